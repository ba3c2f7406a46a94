//! Error types for corpus processing

use thiserror::Error;

/// Errors that can occur while processing an email corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// `DateTime` header did not match the corpus date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// A configured pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be decoded
    #[error("Failed to decode configuration: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Parallel per-record inputs disagree in length
    #[error("Mismatched input lengths: {sources} sources, {destinations} destination sets")]
    MismatchedLengths { sources: usize, destinations: usize },
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;
