// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Corpus Parser and Relationship Graphs
//!
//! Recovers structured records from loosely delimited plaintext emails (such
//! as the Enron corpus) and derives relationship graphs from them.
//!
//! # Pipeline
//!
//! - Raw record pre-cleaning (folded lines, `Re:`/`Fw:` prefixes)
//! - Positional header recovery with synthetic placeholders for missing fields
//! - Header extraction and date/time derivation
//! - Body cleaning through an ordered cascade of pattern rewrites
//! - Address repair and domain extraction for From/To/Cc/Bcc
//! - Domain-flow and sender-recipient edge mapping
//! - Knowledge-graph triples through a caller-supplied sentence analyzer
//!
//! # Example
//!
//! ```rust
//! use mail_corpus_graph::parse_record;
//!
//! let raw = "Date: Mon, 1 Jan 2001 09:00:00 -0600\nFrom: a@x.com\nSubject: Re: Hi\n\nHello > > World";
//! let record = parse_record(0, raw);
//!
//! assert_eq!(record.subject(), "Hi");
//! assert_eq!(record.body, "Hello World");
//! assert_eq!(record.from.domains, vec!["x".to_string()]);
//! ```

mod address;
mod config;
mod error;
mod graph;
mod headers;
mod knowledge;
mod normalize;
mod parser;
mod schema;
mod splitter;
mod types;

pub use address::{domains_of, extract_domain, reformat_addresses, reformat_fragment};
pub use config::{ENTITY_EXCLUSIONS, PipelineConfig};
pub use error::{CorpusError, Result};
pub use graph::*;
pub use headers::*;
pub use knowledge::*;
pub use normalize::{BodyNormalizer, collapse_runs};
pub use parser::{Parser, parse_batch, parse_record};
pub use schema::*;
pub use splitter::*;
pub use types::*;
