//! Expected header layout of a raw record

use serde::Serialize;

/// Header fields of the Enron corpus, in the order they appear in a record
pub const ENRON_FIELDS: [&str; 17] = [
    "Message-ID",
    "Date",
    "From",
    "To",
    "Subject",
    "Cc",
    "Mime-Version",
    "Content-Type",
    "Content-Transfer-Encoding",
    "Bcc",
    "X-From",
    "X-To",
    "X-cc",
    "X-bcc",
    "X-Folder",
    "X-Origin",
    "X-FileName",
];

/// Delimiter separating a field name from its value
pub const FIELD_DELIMITER: char = ':';

/// One expected header field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub expected_length: usize,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            expected_length: name.len(),
            name,
        }
    }

    /// Whether `line` starts with this field's name followed by the delimiter
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        line.get(..self.expected_length) == Some(self.name.as_str())
            && line[self.expected_length..].starts_with(FIELD_DELIMITER)
    }

    /// Synthetic empty line standing in for a missing field
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("{}{FIELD_DELIMITER} ", self.name)
    }
}

/// Ordered list of expected header fields.
///
/// Position in the list is the line a field is expected on. A schema is built
/// once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names.into_iter().map(FieldSpec::new).collect(),
        }
    }

    #[must_use]
    pub fn enron() -> Self {
        Self::new(ENRON_FIELDS)
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Whether `line` carries the field expected at `pos`
    #[must_use]
    pub fn matches(&self, pos: usize, line: &str) -> bool {
        self.fields.get(pos).is_some_and(|f| f.matches(line))
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::enron()
    }
}
