//! Core library for invoice OCR-text normalization.
//!
//! This crate provides:
//! - Rule-based field extraction from noisy invoice OCR text
//! - Date canonicalization to DD-MM-YYYY across several source notations
//! - Amount canonicalization with positional separator inference
//! - Record assembly with completeness invariants and fallback defaults
//!
//! Browser automation, image download, OCR itself, and CSV serialization
//! are collaborators outside this crate: callers feed raw OCR text in and
//! hand the resulting records to whatever sink they use.

pub mod diagnostics;
pub mod error;
pub mod invoice;
pub mod models;

pub use diagnostics::{CollectingDiagnostics, Diagnostics, Event, LogDiagnostics};
pub use error::{ExtractionError, InvnormError, Result};
pub use invoice::rules::{
    format_amount, normalize_amount, DateNormalizer, ExtractedFields, FieldExtractor, FieldMatch,
    NormalizedAmount, NormalizedDate, PatternLibrary,
};
pub use invoice::InvoicePipeline;
pub use models::config::{ExtractionConfig, PipelineConfig};
pub use models::record::{Degradation, InvoiceRecord};
