use super::Properties;
use crate::error::FileError;
use crate::lang::objects;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A property present on both sides with different values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub expected_count: usize,
    pub actual_count: usize,
    /// Names present on both sides, whether or not their values agree
    pub matching_count: usize,
    pub mismatches: Vec<Mismatch>,
    pub missing_in_actual: Properties,
    pub missing_in_expected: Properties,
}

impl DiffReport {
    pub fn is_identical(&self) -> bool {
        self.mismatches.is_empty()
            && self.missing_in_actual.is_empty()
            && self.missing_in_expected.is_empty()
    }
}

fn write_listing(f: &mut fmt::Formatter<'_>, properties: &Properties) -> fmt::Result {
    writeln!(f, "-- listing properties --")?;
    for (name, value) in properties.iter() {
        writeln!(f, "{}={}", name, value)?;
    }
    Ok(())
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expected_count != self.actual_count {
            writeln!(
                f,
                "Expected contains ({}) properties; Actual contains ({}) properties",
                self.expected_count, self.actual_count
            )?;
        } else {
            writeln!(
                f,
                "Both 'expected' and 'actual' contain ({}) properties",
                self.expected_count
            )?;
        }

        if self.matching_count > 0 {
            writeln!(f, "Matching properties found...")?;
        }

        for mismatch in &self.mismatches {
            writeln!(
                f,
                "'{}' = expected ({}); but was ({})",
                mismatch.name, mismatch.expected, mismatch.actual
            )?;
        }

        if self.missing_in_actual.is_empty() {
            writeln!(f, "No missing properties found in 'actual'.")?;
        } else {
            writeln!(f, "Properties in 'expected' not in 'actual':")?;
            write_listing(f, &self.missing_in_actual)?;
        }

        if self.missing_in_expected.is_empty() {
            write!(f, "No missing properties found in 'expected'.")
        } else {
            writeln!(f, "Properties in 'actual' not in 'expected':")?;
            write_listing(f, &self.missing_in_expected)
        }
    }
}

/// Compares two property sets name by name
pub struct PropertiesDiff;

impl PropertiesDiff {
    pub fn diff(expected: &Properties, actual: &Properties) -> DiffReport {
        let actual_names = actual.property_names();
        let matching_names: Vec<_> = expected
            .property_names()
            .into_iter()
            .filter(|name| actual_names.contains(name))
            .collect();
        let matching_count = matching_names.len();

        let mismatches = matching_names
            .into_iter()
            .filter_map(|name| {
                let expected_value = expected.get_property(name);
                let actual_value = actual.get_property(name);
                (!objects::null_safe_equals(expected_value, actual_value)).then(|| Mismatch {
                    name: name.to_string(),
                    expected: expected_value.unwrap_or_default().to_string(),
                    actual: actual_value.unwrap_or_default().to_string(),
                })
            })
            .collect();

        let mut missing_in_actual = expected.clone();
        missing_in_actual.remove_all(actual);
        let mut missing_in_expected = actual.clone();
        missing_in_expected.remove_all(expected);

        DiffReport {
            expected_count: expected.len(),
            actual_count: actual.len(),
            matching_count,
            mismatches,
            missing_in_actual,
            missing_in_expected,
        }
    }

    pub fn diff_files(expected: &Path, actual: &Path) -> crate::Result<DiffReport> {
        let expected = Self::load(expected, false)?;
        let actual = Self::load(actual, false)?;
        Ok(Self::diff(&expected, &actual))
    }

    /// Same as [`diff_files`](Self::diff_files) for the XML properties format
    pub fn diff_xml_files(expected: &Path, actual: &Path) -> crate::Result<DiffReport> {
        let expected = Self::load(expected, true)?;
        let actual = Self::load(actual, true)?;
        Ok(Self::diff(&expected, &actual))
    }

    fn load(path: &Path, xml: bool) -> crate::Result<Properties> {
        let file = File::open(path).map_err(|source| FileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut properties = Properties::new();
        if xml {
            properties.load_from_xml(BufReader::new(file))?;
        } else {
            properties.load(BufReader::new(file))?;
        }
        log::debug!("Loaded {} properties from {}", properties.len(), path.display());
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_identical() {
        let report = PropertiesDiff::diff(&props(&[("a", "1")]), &props(&[("a", "1")]));
        assert!(report.is_identical());
        assert_eq!(
            report.to_string(),
            "Both 'expected' and 'actual' contain (1) properties\n\
             Matching properties found...\n\
             No missing properties found in 'actual'.\n\
             No missing properties found in 'expected'."
        );
    }

    #[test]
    fn test_mismatches_and_missing() {
        let expected = props(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let actual = props(&[("a", "1"), ("b", "20"), ("d", "4")]);

        let report = PropertiesDiff::diff(&expected, &actual);
        assert!(!report.is_identical());
        assert_eq!(
            report.mismatches,
            vec![Mismatch {
                name: "b".to_string(),
                expected: "2".to_string(),
                actual: "20".to_string(),
            }]
        );
        assert_eq!(report.missing_in_actual, props(&[("c", "3")]));
        assert_eq!(report.missing_in_expected, props(&[("d", "4")]));

        assert_eq!(report.matching_count, 2);

        let rendered = report.to_string();
        assert!(rendered.contains("Matching properties found...\n'b' = expected (2); but was (20)"));
        assert!(rendered.contains("Properties in 'expected' not in 'actual':\n-- listing properties --\nc=3"));
        assert!(rendered.contains("Properties in 'actual' not in 'expected':\n-- listing properties --\nd=4"));
    }

    #[test]
    fn test_disjoint_sets_skip_matching_line() {
        let report = PropertiesDiff::diff(&props(&[("a", "1")]), &props(&[("b", "2")]));
        assert_eq!(report.matching_count, 0);
        assert!(!report.to_string().contains("Matching properties found..."));
    }

    #[test]
    fn test_size_difference_is_reported() {
        let report = PropertiesDiff::diff(&props(&[("a", "1"), ("b", "2")]), &props(&[("a", "1")]));
        assert!(report
            .to_string()
            .starts_with("Expected contains (2) properties; Actual contains (1) properties"));
    }

    #[test]
    fn test_diff_files() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let expected = temp_dir.path().join("expected.properties");
        let actual = temp_dir.path().join("actual.properties");
        fs::write(&expected, "host=localhost\nport=10235\n").unwrap();
        fs::write(&actual, "host = localhost\nport = 8080\n").unwrap();

        let report = PropertiesDiff::diff_files(&expected, &actual).unwrap();
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].name, "port");

        let missing = temp_dir.path().join("missing.properties");
        assert!(PropertiesDiff::diff_files(&missing, &actual).is_err());
    }

    #[test]
    fn test_diff_xml_files() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let expected = temp_dir.path().join("expected.xml");
        let actual = temp_dir.path().join("actual.xml");
        fs::write(
            &expected,
            r#"<properties><entry key="host">localhost</entry></properties>"#,
        )
        .unwrap();
        fs::write(
            &actual,
            r#"<properties><entry key="host">localhost</entry></properties>"#,
        )
        .unwrap();

        assert!(PropertiesDiff::diff_xml_files(&expected, &actual).unwrap().is_identical());
    }
}
