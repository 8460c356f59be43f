use crate::error::FileError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One `groupId:artifactId:version` coordinate seen in a dependency tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl Dependency {
    /// Parse a Maven coordinate such as `org.slf4j:slf4j-api:jar:1.7.36:compile`.
    ///
    /// Accepts `g:a:v`, `g:a:packaging:v`, `g:a:packaging:v:scope` and
    /// `g:a:packaging:classifier:v:scope`.
    pub fn parse(coordinate: &str) -> Option<Self> {
        let parts: Vec<&str> = coordinate.split(':').map(str::trim).collect();

        let version = match parts.len() {
            3 => parts[2],
            4 => parts[3],
            5 | 6 => parts[parts.len() - 2],
            _ => return None,
        };

        if parts[0].is_empty() || parts[1].is_empty() || version.is_empty() {
            return None;
        }

        Some(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: version.to_string(),
        })
    }
}

/// Every version of every artifact found across one or more
/// `mvn dependency:tree` outputs, keyed by group then artifact.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    graph: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dependency: Dependency) {
        self.graph
            .entry(dependency.group_id)
            .or_default()
            .entry(dependency.artifact_id)
            .or_default()
            .insert(dependency.version);
    }

    /// Add the dependency on each tree line; lines without a coordinate are skipped
    pub fn parse_lines<'a, I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parsed = 0;
        for line in lines {
            if let Some(dependency) = coordinate_of(line).and_then(Dependency::parse) {
                self.add(dependency);
                parsed += 1;
            }
        }
        parsed
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<usize, FileError> {
        let io_error = |source| FileError::Io {
            path: path.display().to_string(),
            source,
        };

        let reader = BufReader::new(File::open(path).map_err(io_error)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.map_err(io_error)?);
        }

        let parsed = self.parse_lines(lines.iter().map(String::as_str));
        log::debug!("Parsed ({}) dependencies from ({})", parsed, path.display());
        Ok(parsed)
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn versions(&self, group_id: &str, artifact_id: &str) -> Option<&BTreeSet<String>> {
        self.graph.get(group_id)?.get(artifact_id)
    }

    /// All dependencies in group, artifact, version order
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.collect(false)
    }

    /// Only artifacts that appear with more than one version
    pub fn duplicates(&self) -> Vec<Dependency> {
        self.collect(true)
    }

    fn collect(&self, duplicates_only: bool) -> Vec<Dependency> {
        let mut dependencies = Vec::new();
        for (group_id, artifacts) in &self.graph {
            for (artifact_id, versions) in artifacts {
                if duplicates_only && versions.len() < 2 {
                    continue;
                }
                dependencies.extend(versions.iter().map(|version| Dependency {
                    group_id: group_id.clone(),
                    artifact_id: artifact_id.clone(),
                    version: version.clone(),
                }));
            }
        }
        dependencies
    }
}

/// The coordinate portion of a tree line, starting at its first letter.
/// A leading `[INFO]` style log tag is skipped.
fn coordinate_of(line: &str) -> Option<&str> {
    let line = match line.trim_start().strip_prefix('[') {
        Some(tagged) => tagged.split_once(']').map_or(line, |(_, rest)| rest),
        None => line,
    };

    // Plugin banners such as `--- maven-dependency-plugin:2.8:tree (default-cli) @ app ---`
    if line.trim_start().starts_with("---") {
        return None;
    }

    let start = line.find(char::is_alphabetic)?;
    line[start..].split_whitespace().next()
}
