//! Content documents and the dot-path text lookup table.

use evidence_core::error::DomainError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::model::{Archetype, Scenario};

/// Read-only view over the text table of a content document.
///
/// Keys are dot-separated paths (`buttons.startJourney`). Array elements
/// can be addressed by index (`scenarios.0.question`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    root: Value,
}

impl TextTable {
    /// Wraps a JSON value as a text table.
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Walks `path` through the table and returns the terminal string, if any.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut value = &self.root;
        for segment in path.split('.') {
            value = match value {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        value.as_str()
    }

    /// Returns the text at `path`, or `fallback` if any segment is missing or
    /// the terminal value is not a string.
    #[must_use]
    pub fn t<'a>(&'a self, path: &str, fallback: &'a str) -> &'a str {
        self.lookup(path).unwrap_or(fallback)
    }

    /// Returns the text at `path`, or the path itself when it is missing.
    #[must_use]
    pub fn text<'a>(&'a self, path: &'a str) -> &'a str {
        self.t(path, path)
    }
}

/// A fully parsed content document for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentDocument {
    text: TextTable,
    scenarios: Vec<Scenario>,
    archetypes: Vec<Archetype>,
    version_hash: String,
}

impl ContentDocument {
    /// Builds a document from a parsed JSON value. Missing `scenarios` or
    /// `archetypes` arrays yield empty lists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the root is not an object or if
    /// either list is present but malformed.
    pub fn from_value(root: Value) -> Result<Self, DomainError> {
        if !root.is_object() {
            return Err(DomainError::Validation(
                "content document must be an object".to_owned(),
            ));
        }
        let scenarios = list_field(&root, "scenarios")?;
        let archetypes = list_field(&root, "archetypes")?;
        let version_hash = version_hash(&root)?;
        Ok(Self {
            text: TextTable::new(root),
            scenarios,
            archetypes,
            version_hash,
        })
    }

    /// Parses a JSON content document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on malformed JSON or content.
    pub fn from_json_str(source: &str) -> Result<Self, DomainError> {
        let root: Value = serde_json::from_str(source)
            .map_err(|e| DomainError::Validation(format!("invalid JSON content: {e}")))?;
        Self::from_value(root)
    }

    /// Parses a YAML content document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on malformed YAML or content.
    pub fn from_yaml_str(source: &str) -> Result<Self, DomainError> {
        let root: Value = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Validation(format!("invalid YAML content: {e}")))?;
        Self::from_value(root)
    }

    /// The text lookup table (the whole document).
    #[must_use]
    pub fn text(&self) -> &TextTable {
        &self.text
    }

    /// Ordered scenarios.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Ordered archetypes.
    #[must_use]
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Hex SHA-256 of the canonical JSON form of the document.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// Returns whether there is enough content to play a round.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.scenarios.is_empty() && !self.archetypes.is_empty()
    }
}

fn list_field<T: DeserializeOwned>(root: &Value, field: &str) -> Result<Vec<T>, DomainError> {
    match root.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| DomainError::Validation(format!("invalid {field}: {e}"))),
    }
}

// `Value` objects are key-sorted, so equal documents hash equally whether
// they came from JSON or YAML.
fn version_hash(root: &Value) -> Result<String, DomainError> {
    let canonical = serde_json::to_vec(root)
        .map_err(|e| DomainError::Infrastructure(format!("content serialization failed: {e}")))?;
    Ok(format!("{:x}", Sha256::digest(&canonical)))
}
