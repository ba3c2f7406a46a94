//! Per-record pipeline and batch driver

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::headers::{DATETIME_KEY, HeaderMap, derive_date_time};
use crate::normalize::BodyNormalizer;
use crate::schema::FieldSchema;
use crate::splitter::{preclean, split_record};
use crate::types::{AddressField, Batch, RecordFailure, StructuredRecord};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static DEFAULT_PARSER: LazyLock<Parser> =
    LazyLock::new(|| Parser::new(PipelineConfig::default()).unwrap());

// Slots whose values should look like they carry an address.
const ADDRESS_SLOTS: [&str; 5] = ["Message-ID", "From", "To", "Cc", "Bcc"];

/// Parse one raw record with the default Enron configuration
#[must_use]
pub fn parse_record(index: usize, raw: &str) -> StructuredRecord {
    DEFAULT_PARSER.parse_record(index, raw)
}

/// Parse raw records in order with the default Enron configuration
#[must_use]
pub fn parse_batch<I, S>(raws: I) -> Batch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_PARSER.parse_batch(raws)
}

/// Turns raw records into structured records.
///
/// Holds the schema and the compiled body rules; records share no other
/// state, so the output for a record depends on that record alone.
#[derive(Debug, Clone)]
pub struct Parser {
    config: PipelineConfig,
    schema: FieldSchema,
    normalizer: BodyNormalizer,
}

impl Parser {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let schema = config.schema();
        let normalizer = BodyNormalizer::new(config.body_field_names())?;
        Ok(Self {
            config,
            schema,
            normalizer,
        })
    }

    #[must_use]
    pub const fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub const fn normalizer(&self) -> &BodyNormalizer {
        &self.normalizer
    }

    /// Parse one record. A `DateTime` that does not parse leaves `date` and
    /// `time` empty.
    #[must_use]
    pub fn parse_record(&self, index: usize, raw: &str) -> StructuredRecord {
        self.parse_with_failure(index, raw).0
    }

    /// Parse records sequentially, keeping input order and collecting
    /// date/time failures instead of stopping on them
    #[must_use]
    pub fn parse_batch<I, S>(&self, raws: I) -> Batch
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = Batch::default();
        for (index, raw) in raws.into_iter().enumerate() {
            let (record, failure) = self.parse_with_failure(index, raw.as_ref());
            batch.records.push(record);
            batch.failures.extend(failure);
        }

        info!(
            records = batch.records.len(),
            failures = batch.failures.len(),
            "Parsed batch"
        );
        batch
    }

    fn parse_with_failure(
        &self,
        index: usize,
        raw: &str,
    ) -> (StructuredRecord, Option<RecordFailure>) {
        let cleaned = preclean(raw, &self.config.raw_replacements);
        let split = split_record(&cleaned, &self.schema);
        let headers = HeaderMap::from_lines(&split.header);
        flag_implausible(index, &headers);

        let body = self.normalizer.normalize(&split.joined_body());

        let (date, time, failure) =
            match derive_date_time(headers.value(DATETIME_KEY), self.config.date_suffix_len) {
                Ok((date, time)) => (Some(date), Some(time), None),
                Err(e) => {
                    warn!(index, error = %e, "Skipping date/time derivation");
                    let failure = RecordFailure {
                        index,
                        reason: e.to_string(),
                    };
                    (None, None, Some(failure))
                }
            };

        let record = StructuredRecord {
            index,
            from: AddressField::from_value(headers.value("From")),
            to: AddressField::from_value(headers.value("To")),
            cc: AddressField::from_value(headers.value("Cc")),
            bcc: AddressField::from_value(headers.value("Bcc")),
            headers,
            body,
            date,
            time,
        };

        debug!(
            index,
            inserted = split.inserted.len(),
            subject = record.subject(),
            "Parsed record"
        );
        (record, failure)
    }
}

// Misaligned slots are not repaired, only reported.
fn flag_implausible(index: usize, headers: &HeaderMap) {
    for key in ADDRESS_SLOTS {
        let value = headers.value(key);
        if !value.is_empty() && !value.contains('@') {
            debug!(index, field = key, value, "Header value does not look like an address");
        }
    }
}
