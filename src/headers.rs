//! Header extraction from the fixed header block

use crate::error::{CorpusError, Result};
use crate::schema::FIELD_DELIMITER;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw key of the send timestamp
pub const DATE_KEY: &str = "Date";

/// Exposed key of the send timestamp
pub const DATETIME_KEY: &str = "DateTime";

/// Corpus timestamp layout after the `<weekday>, ` prefix, once the trailing
/// zone label is cut off
pub const DATE_FORMAT_WITH_OFFSET: &str = "%d %b %Y %H:%M:%S %z";

/// Same layout when the cut also removed the numeric offset
pub const DATE_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Number of trailing characters dropped from `DateTime` before parsing,
/// e.g. ` (PDT)`
pub const DEFAULT_DATE_SUFFIX_LEN: usize = 6;

/// Header key/value pairs recovered from one record, in header order.
///
/// Keys are the literal text before the first colon of each header line, so a
/// malformed line yields a key that is not a schema name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Build from header lines, renaming `Date` to `DateTime`
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for line in lines {
            let (key, value) = split_header_line(line.as_ref());
            let key = if key == DATE_KEY {
                DATETIME_KEY.to_string()
            } else {
                key
            };
            map.insert(key, value);
        }
        map
    }

    // A repeated key keeps its first position and takes the later value.
    fn insert(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or an empty string when the key is absent
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a header line at its first colon into a key and a trimmed value.
///
/// Later colons stay in the value (`Date: Mon, 14 May 2001 16:39:00`). A line
/// without a colon becomes a key with an empty value.
#[must_use]
pub fn split_header_line(line: &str) -> (String, String) {
    line.split_once(FIELD_DELIMITER).map_or_else(
        || (line.to_string(), String::new()),
        |(key, value)| (key.to_string(), value.trim().to_string()),
    )
}

/// Derive the calendar day and wall-clock time of a `DateTime` value.
///
/// The last `suffix_len` characters are dropped first. The remainder must
/// read `<weekday>, <day> <month> <year> <h>:<m>:<s>`, optionally followed
/// by a numeric offset which is discarded. The weekday must be a weekday
/// name but is not checked against the date.
pub fn derive_date_time(value: &str, suffix_len: usize) -> Result<(NaiveDate, NaiveTime)> {
    let invalid =
        |reason: &dyn fmt::Display| CorpusError::InvalidDate(format!("{value:?}: {reason}"));

    let trimmed = value.trim();
    let keep = trimmed.chars().count().saturating_sub(suffix_len);
    let head: String = trimmed.chars().take(keep).collect();

    let (weekday, rest) = head
        .split_once(',')
        .ok_or_else(|| invalid(&"missing weekday"))?;
    weekday.trim().parse::<Weekday>().map_err(|e| invalid(&e))?;
    let rest = rest.trim();

    let parsed = match DateTime::parse_from_str(rest, DATE_FORMAT_WITH_OFFSET) {
        Ok(dt) => dt.naive_local(),
        // Report the offset layout's error when neither layout fits.
        Err(first) => {
            NaiveDateTime::parse_from_str(rest, DATE_FORMAT).map_err(|_| invalid(&first))?
        }
    };

    Ok((parsed.date(), parsed.time()))
}
