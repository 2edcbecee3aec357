//! Rule-based field recognition for noisy invoice OCR text.

pub mod amounts;
pub mod dates;
pub mod fields;
pub mod patterns;

pub use amounts::{format_amount, normalize_amount, NormalizedAmount};
pub use dates::{DateNormalizer, NormalizedDate, SOURCE_FORMATS};
pub use fields::{ExtractedFields, FieldExtractor};
pub use patterns::PatternLibrary;

use regex::Regex;

/// One candidate recognition pattern for a field.
///
/// Patterns for a field live in a fixed-order slice; they are tried in
/// order and the first successful match wins. No scoring.
pub struct FieldPattern {
    /// Stable pattern name, used in diagnostics.
    pub name: &'static str,
    /// Compiled matcher.
    pub regex: &'static Regex,
    /// Capture group holding the field value.
    pub group: usize,
}

/// A successful field match: the winning pattern and the raw capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Name of the pattern that won.
    pub pattern: &'static str,
    /// Raw captured substring, trimmed.
    pub value: String,
}

impl FieldPattern {
    /// Apply this pattern to `text`.
    pub fn apply(&self, text: &str) -> Option<FieldMatch> {
        let caps = self.regex.captures(text)?;
        let value = caps.get(self.group)?.as_str().trim();
        if value.is_empty() {
            return None;
        }
        Some(FieldMatch {
            pattern: self.name,
            value: value.to_string(),
        })
    }
}

/// Try `patterns` in order; first match wins.
pub(crate) fn first_match(patterns: &[FieldPattern], text: &str) -> Option<FieldMatch> {
    patterns.iter().find_map(|p| p.apply(text))
}
