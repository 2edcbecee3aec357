//! Error types for the invnorm-core library.

use thiserror::Error;

/// Main error type for the invnorm library.
#[derive(Error, Debug)]
pub enum InvnormError {
    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors that invalidate a single invoice record.
///
/// These abort the record, never the run: the caller logs the failure and
/// moves on to the next invoice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A mandatory field (invoice number or total) could not be recovered.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// The captured amount contained no usable digits.
    #[error("unparseable amount: {raw:?}")]
    UnparseableAmount { raw: String },
}

/// Result type for the invnorm library.
pub type Result<T> = std::result::Result<T, InvnormError>;
