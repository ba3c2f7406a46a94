//! Structured records produced from raw corpus entries

use crate::address::{domains_of, reformat_addresses};
use crate::error::Result;
use crate::headers::HeaderMap;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Column names of the tabular record set, in order
pub const COLUMNS: [&str; 24] = [
    "Message-ID",
    "DateTime",
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
    "body",
    "date",
    "time",
    "From_domain",
    "To_domain",
    "Cc_domain",
    "Bcc_domain",
];

/// A sender/recipient header after address repair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressField {
    /// One entry per comma-separated fragment, possibly empty
    pub addresses: Vec<String>,

    /// Unique domains of `addresses`, sorted
    pub domains: Vec<String>,
}

impl AddressField {
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        let addresses = reformat_addresses(value);
        let domains = domains_of(&addresses);
        Self { addresses, domains }
    }

    /// First non-empty address
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.addresses
            .iter()
            .map(String::as_str)
            .find(|a| !a.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.iter().all(String::is_empty)
    }
}

/// One parsed corpus entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Position of the raw record in the input
    pub index: usize,

    /// Header values as recovered, `Date` exposed as `DateTime`
    pub headers: HeaderMap,

    /// Cleaned message body
    pub body: String,

    pub from: AddressField,
    pub to: AddressField,
    pub cc: AddressField,
    pub bcc: AddressField,

    /// Calendar day of `DateTime`, if it could be parsed
    pub date: Option<NaiveDate>,

    /// Wall-clock time of `DateTime`, if it could be parsed
    pub time: Option<NaiveTime>,
}

impl StructuredRecord {
    /// Raw header value, empty when absent
    #[must_use]
    pub fn header(&self, key: &str) -> &str {
        self.headers.value(key)
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        self.header("Subject")
    }

    /// Sender address used as the source of network edges
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.from.first()
    }

    /// Sender domain used as the source of domain-flow edges
    #[must_use]
    pub fn sender_domain(&self) -> Option<&str> {
        self.from.domains.first().map(String::as_str)
    }

    #[must_use]
    pub fn to_row(&self) -> RecordRow {
        let h = |key: &str| self.header(key).to_string();
        RecordRow {
            message_id: h("Message-ID"),
            date_time: h("DateTime"),
            from: self.from.addresses.clone(),
            to: self.to.addresses.clone(),
            subject: h("Subject"),
            cc: self.cc.addresses.clone(),
            mime_version: h("Mime-Version"),
            content_type: h("Content-Type"),
            content_transfer_encoding: h("Content-Transfer-Encoding"),
            bcc: self.bcc.addresses.clone(),
            x_from: h("X-From"),
            x_to: h("X-To"),
            x_cc: h("X-cc"),
            x_bcc: h("X-bcc"),
            x_folder: h("X-Folder"),
            x_origin: h("X-Origin"),
            x_filename: h("X-FileName"),
            body: self.body.clone(),
            date: self.date,
            time: self.time,
            from_domain: self.from.domains.clone(),
            to_domain: self.to.domains.clone(),
            cc_domain: self.cc.domains.clone(),
            bcc_domain: self.bcc.domains.clone(),
        }
    }
}

/// Flat row handed to table and graph consumers; fields serialize in
/// [`COLUMNS`] order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Message-ID")]
    pub message_id: String,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "From")]
    pub from: Vec<String>,
    #[serde(rename = "To")]
    pub to: Vec<String>,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Cc")]
    pub cc: Vec<String>,
    #[serde(rename = "Mime-Version")]
    pub mime_version: String,
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Content-Transfer-Encoding")]
    pub content_transfer_encoding: String,
    #[serde(rename = "Bcc")]
    pub bcc: Vec<String>,
    #[serde(rename = "X-From")]
    pub x_from: String,
    #[serde(rename = "X-To")]
    pub x_to: String,
    #[serde(rename = "X-cc")]
    pub x_cc: String,
    #[serde(rename = "X-bcc")]
    pub x_bcc: String,
    #[serde(rename = "X-Folder")]
    pub x_folder: String,
    #[serde(rename = "X-Origin")]
    pub x_origin: String,
    #[serde(rename = "X-FileName")]
    pub x_filename: String,
    pub body: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    #[serde(rename = "From_domain")]
    pub from_domain: Vec<String>,
    #[serde(rename = "To_domain")]
    pub to_domain: Vec<String>,
    #[serde(rename = "Cc_domain")]
    pub cc_domain: Vec<String>,
    #[serde(rename = "Bcc_domain")]
    pub bcc_domain: Vec<String>,
}

/// A record whose date/time derivation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub index: usize,
    pub reason: String,
}

/// Result of parsing a batch of raw records, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub records: Vec<StructuredRecord>,
    pub failures: Vec<RecordFailure>,
}

impl Batch {
    #[must_use]
    pub fn rows(&self) -> Vec<RecordRow> {
        self.records.iter().map(StructuredRecord::to_row).collect()
    }

    /// Rows as a JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows())?)
    }

    #[must_use]
    pub fn bodies(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.body.as_str()).collect()
    }
}
