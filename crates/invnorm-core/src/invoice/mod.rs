//! Invoice field extraction and normalization.

mod pipeline;
pub mod rules;

pub use pipeline::InvoicePipeline;

use crate::error::ExtractionError;

/// Result type for per-invoice extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
