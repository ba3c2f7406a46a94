//! Pipeline configuration

use crate::error::{CorpusError, Result};
use crate::headers::{DATE_KEY, DEFAULT_DATE_SUFFIX_LEN};
use crate::schema::{ENRON_FIELDS, FieldSchema};
use crate::splitter::{Replacement, default_replacements};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Entities that carry no information on their own
pub const ENTITY_EXCLUSIONS: [&str; 16] = [
    "", "you", "i", "me", "them", "we", "they", "it", "this", "who", "us", "he", "that", "she",
    "what", ">",
];

/// Settings for one run over a corpus.
///
/// Missing keys in a JSON document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Expected header fields in record order
    pub fields: Vec<String>,

    /// Extra header tokens stripped from bodies besides the schema fields
    pub extra_body_fields: Vec<String>,

    /// Lower-case entities skipped when building knowledge-graph triples
    pub entity_exclusions: Vec<String>,

    /// Literal rewrites applied to each raw record before splitting
    pub raw_replacements: Vec<Replacement>,

    /// Trailing characters cut from `DateTime` before parsing
    pub date_suffix_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fields: ENRON_FIELDS.iter().map(ToString::to_string).collect(),
            extra_body_fields: vec!["Sent".to_string()],
            entity_exclusions: ENTITY_EXCLUSIONS.iter().map(ToString::to_string).collect(),
            raw_replacements: default_replacements(),
            date_suffix_len: DEFAULT_DATE_SUFFIX_LEN,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(CorpusError::InvalidConfig("fields must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.trim().is_empty() {
                return Err(CorpusError::InvalidConfig("field names must not be blank".into()));
            }
            if !seen.insert(field.as_str()) {
                return Err(CorpusError::InvalidConfig(format!("duplicate field: {field}")));
            }
        }

        if !seen.contains(DATE_KEY) {
            return Err(CorpusError::InvalidConfig(format!("fields must include {DATE_KEY}")));
        }

        if self.raw_replacements.iter().any(|r| r.from.is_empty()) {
            return Err(CorpusError::InvalidConfig(
                "replacement source must not be empty".into(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn schema(&self) -> FieldSchema {
        FieldSchema::new(self.fields.iter().cloned())
    }

    /// Names stripped from bodies: every field plus the extras
    #[must_use]
    pub fn body_field_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .chain(&self.extra_body_fields)
            .map(String::as_str)
    }
}
