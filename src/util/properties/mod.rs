//! String key/value properties with optional defaults, in the `.properties`
//! text and XML formats.

mod diff;
mod format;

pub use diff::{DiffReport, Mismatch, PropertiesDiff};

use crate::error::PropertiesError;
use crate::lang::strings;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::io::{Read, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
    defaults: Option<Box<Properties>>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookups that miss fall through to `defaults`
    pub fn with_defaults(defaults: Properties) -> Self {
        Self {
            entries: BTreeMap::new(),
            defaults: Some(Box::new(defaults)),
        }
    }

    pub fn defaults(&self) -> Option<&Properties> {
        self.defaults.as_deref()
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .or_else(|| self.defaults().and_then(|defaults| defaults.get_property(name)))
    }

    pub fn get_property_or<'a>(&'a self, name: &str, default_value: &'a str) -> &'a str {
        self.get_property(name).unwrap_or(default_value)
    }

    /// Returns the previous value set directly on this instance
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Whether `name` is set directly on this instance, ignoring defaults
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Every resolvable name, including those only present in the defaults
    pub fn property_names(&self) -> BTreeSet<&str> {
        let mut names = self
            .defaults()
            .map(Properties::property_names)
            .unwrap_or_default();
        names.extend(self.entries.keys().map(String::as_str));
        names
    }

    /// Number of entries set directly on this instance
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Drop every entry whose name resolves in `other`
    pub fn remove_all(&mut self, other: &Properties) -> &mut Self {
        let names = other.property_names();
        self.entries.retain(|name, _| !names.contains(name.as_str()));
        self
    }

    pub fn load<R: Read>(&mut self, mut reader: R) -> Result<(), PropertiesError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        for (name, value) in format::parse(&text)? {
            self.entries.insert(name, value);
        }
        Ok(())
    }

    pub fn load_from_xml<R: Read>(&mut self, mut reader: R) -> Result<(), PropertiesError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        for (name, value) in format::parse_xml(&text)? {
            self.entries.insert(name, value);
        }
        Ok(())
    }

    /// Write the entries set on this instance in `.properties` format
    pub fn store<W: Write>(&self, writer: W, comments: Option<&str>) -> std::io::Result<()> {
        format::write(writer, comments, self.iter())
    }

    pub fn store_to_xml<W: Write>(&self, writer: W, comment: Option<&str>) -> std::io::Result<()> {
        format::write_xml(writer, comment, self.iter())
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_string(Some(self)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (name, value) in iter {
            properties.set_property(name, value);
        }
        properties
    }
}

/// Fluent construction of [`Properties`]
#[derive(Debug, Default)]
pub struct PropertiesBuilder {
    properties: Properties,
}

impl PropertiesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: Properties) -> Self {
        Self {
            properties: Properties::with_defaults(defaults),
        }
    }

    pub fn set_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set_property(name, value);
        self
    }

    pub fn load<R: Read>(mut self, reader: R) -> Result<Self, PropertiesError> {
        self.properties.load(reader)?;
        Ok(self)
    }

    pub fn load_from_xml<R: Read>(mut self, reader: R) -> Result<Self, PropertiesError> {
        self.properties.load_from_xml(reader)?;
        Ok(self)
    }

    pub fn build(self) -> Properties {
        self.properties
    }
}

pub fn create_properties(map: Option<&HashMap<String, String>>) -> Properties {
    map.map(|map| map.iter().map(|(name, value)| (name.clone(), value.clone())).collect())
        .unwrap_or_default()
}

/// `[a = 1, b = 2]` over every resolvable name, sorted
pub fn to_string(properties: Option<&Properties>) -> String {
    let pairs: Vec<String> = properties
        .map(|properties| {
            properties
                .property_names()
                .into_iter()
                .map(|name| {
                    format!("{} = {}", name, properties.get_property(name).unwrap_or_default())
                })
                .collect()
        })
        .unwrap_or_default();

    format!("[{}]", strings::concat(&pairs, strings::COMMA_SPACE_DELIMITER))
}
