//! Raw record pre-cleaning and header/body splitting

use crate::schema::FieldSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Literal rewrite applied to a raw record before it is split into lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Rewrites that undo header folding and drop reply/forward prefixes
#[must_use]
pub fn default_replacements() -> Vec<Replacement> {
    vec![
        // folded subject lines
        Replacement::new("\n ", " "),
        Replacement::new("Re: ", ""),
        Replacement::new("Fw: ", ""),
        // folded recipient lists
        Replacement::new("\n\t", ""),
        Replacement::new(" : ", ""),
        Replacement::new("[IMAGE]", ""),
    ]
}

/// Apply `replacements` to `raw` in order
#[must_use]
pub fn preclean(raw: &str, replacements: &[Replacement]) -> String {
    replacements
        .iter()
        .fold(raw.to_string(), |text, r| text.replace(&r.from, &r.to))
}

/// A raw record cut into its fixed-size header block and its body block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Exactly one line per schema field, in schema order
    pub header: Vec<String>,

    /// Remaining lines after the header block
    pub body: Vec<String>,

    /// Schema positions that received a synthetic empty field
    pub inserted: Vec<usize>,
}

impl SplitRecord {
    /// Body lines joined with single spaces and trimmed
    #[must_use]
    pub fn joined_body(&self) -> String {
        self.body.join(" ").trim().to_string()
    }
}

/// Split a raw record into header and body lines.
///
/// Walks the schema left to right with a cursor into the physical lines. When
/// the line under the cursor starts with the expected field name and its
/// delimiter it is taken as that field; otherwise an empty placeholder is
/// emitted and the cursor stays put, so the line is tried against the next
/// field. Earlier positions are never revisited.
///
/// Two adjacent missing fields can misalign later values if an unrelated line
/// happens to carry a matching prefix. That is left as is.
#[must_use]
pub fn split_record(raw: &str, schema: &FieldSchema) -> SplitRecord {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let mut header = Vec::with_capacity(schema.len());
    let mut inserted = Vec::new();
    let mut cursor = 0;

    for (pos, field) in schema.fields().iter().enumerate() {
        match lines.get(cursor) {
            Some(line) if field.matches(line) => {
                header.push((*line).to_string());
                cursor += 1;
            }
            _ => {
                debug!(field = %field.name, pos, "Inserting missing header field");
                header.push(field.placeholder());
                inserted.push(pos);
            }
        }
    }

    let body = lines
        .get(cursor..)
        .unwrap_or_default()
        .iter()
        .map(|l| (*l).to_string())
        .collect();

    SplitRecord {
        header,
        body,
        inserted,
    }
}
