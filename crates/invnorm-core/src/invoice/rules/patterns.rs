//! Candidate recognition patterns for invoice fields.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::models::config::ExtractionConfig;

use super::FieldPattern;

lazy_static! {
    // Invoice number patterns
    static ref INVOICE_NO_LABELED: Regex = Regex::new(
        r"(?i)\binvoice\s*(?:no\.?|number|#)?\s*[:#]?\s*(\d+)"
    ).unwrap();

    static ref INVOICE_NO_INV: Regex = Regex::new(
        r"(?i)\bINV[\s\-]?(\d+)\b"
    ).unwrap();

    static ref INVOICE_NO_HASH: Regex = Regex::new(
        r"#\s*(\d+)"
    ).unwrap();

    // Labeled date patterns
    static ref DATE_LABELED_DMY: Regex = Regex::new(
        r"(?i)\bdate\b\s*[:\s]\s*(\d{1,2}[\-/]\d{1,2}[\-/](?:\d{4}|\d{2}))"
    ).unwrap();

    static ref DATE_LABELED_TEXT: Regex = Regex::new(
        r"(?i)\bdate\b\s*[:\s]\s*(\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})"
    ).unwrap();

    static ref DATE_LABELED_MONTH_FIRST: Regex = Regex::new(
        r"(?i)\bdate\b\s*[:\s]\s*([A-Za-z]{3,9}\s+\d{1,2},\s*\d{4})"
    ).unwrap();

    static ref DATE_LABELED_ISO: Regex = Regex::new(
        r"(?i)\bdate\b\s*[:\s]\s*(\d{4}-\d{2}-\d{2})"
    ).unwrap();

    // Bare date-shaped substrings, anywhere in the text
    static ref DATE_BARE_ISO: Regex = Regex::new(
        r"\b(\d{4}-\d{2}-\d{2})\b"
    ).unwrap();

    static ref DATE_BARE_DMY: Regex = Regex::new(
        r"\b(\d{1,2}[\-/]\d{1,2}[\-/](?:\d{4}|\d{2}))\b"
    ).unwrap();

    static ref DATE_BARE_TEXT: Regex = Regex::new(
        r"(?i)\b(\d{1,2}\s+(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{4})\b"
    ).unwrap();

    static ref DATE_BARE_MONTH_FIRST: Regex = Regex::new(
        r"(?i)\b((?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},\s*\d{4})\b"
    ).unwrap();

    // Structural company patterns
    static ref COMPANY_BEFORE_BILL_TO: Regex = Regex::new(
        r"(?i)([^\n]+?)\s*(?:\n\s*)?bill\s+to\b"
    ).unwrap();

    static ref COMPANY_TO_LINE: Regex = Regex::new(
        r"(?im)^\s*to\s*[:;]\s*(\S[^\n]*)$"
    ).unwrap();

    static ref COMPANY_ATT_NEXT_LINE: Regex = Regex::new(
        r"(?im)^\s*att(?:n)?\.?\s*:[^\n]*\n\s*(\S[^\n]*)$"
    ).unwrap();

    static ref COMPANY_CORP_SUFFIX: Regex = Regex::new(
        r"(?im)^\s*([^\n]*\b(?:corp|llc)\.?)\s*$"
    ).unwrap();

    // Amount patterns
    static ref TOTAL_LABELED: Regex = Regex::new(
        r"(?i)\btotal\b(?:\s+due)?\s*[:\s]\s*\$?\s*(\d[\d.,]*)"
    ).unwrap();

    static ref AMOUNT_LABELED: Regex = Regex::new(
        r"(?i)\bamount\b(?:\s+due)?\s*[:\s]\s*\$?\s*(\d[\d.,]*)"
    ).unwrap();

    static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"(\d{1,3}(?:[.,]\d{3})*[.,]\d{2})\s*$"
    ).unwrap();

    // Ordered priority chains, first match wins.
    static ref INVOICE_NO_PATTERNS: [FieldPattern; 3] = [
        FieldPattern { name: "invoice_no_labeled", regex: &INVOICE_NO_LABELED, group: 1 },
        FieldPattern { name: "invoice_no_inv_prefix", regex: &INVOICE_NO_INV, group: 1 },
        FieldPattern { name: "invoice_no_hash", regex: &INVOICE_NO_HASH, group: 1 },
    ];

    static ref INVOICE_DATE_PATTERNS: [FieldPattern; 8] = [
        FieldPattern { name: "date_labeled_dmy", regex: &DATE_LABELED_DMY, group: 1 },
        FieldPattern { name: "date_labeled_text", regex: &DATE_LABELED_TEXT, group: 1 },
        FieldPattern { name: "date_labeled_month_first", regex: &DATE_LABELED_MONTH_FIRST, group: 1 },
        FieldPattern { name: "date_labeled_iso", regex: &DATE_LABELED_ISO, group: 1 },
        FieldPattern { name: "date_bare_iso", regex: &DATE_BARE_ISO, group: 1 },
        FieldPattern { name: "date_bare_dmy", regex: &DATE_BARE_DMY, group: 1 },
        FieldPattern { name: "date_bare_text", regex: &DATE_BARE_TEXT, group: 1 },
        FieldPattern { name: "date_bare_month_first", regex: &DATE_BARE_MONTH_FIRST, group: 1 },
    ];

    static ref COMPANY_PATTERNS: [FieldPattern; 4] = [
        FieldPattern { name: "company_before_bill_to", regex: &COMPANY_BEFORE_BILL_TO, group: 1 },
        FieldPattern { name: "company_to_line", regex: &COMPANY_TO_LINE, group: 1 },
        FieldPattern { name: "company_att_next_line", regex: &COMPANY_ATT_NEXT_LINE, group: 1 },
        FieldPattern { name: "company_corp_suffix", regex: &COMPANY_CORP_SUFFIX, group: 1 },
    ];

    static ref TOTAL_DUE_PATTERNS: [FieldPattern; 3] = [
        FieldPattern { name: "total_labeled", regex: &TOTAL_LABELED, group: 1 },
        FieldPattern { name: "amount_labeled", regex: &AMOUNT_LABELED, group: 1 },
        FieldPattern { name: "trailing_amount", regex: &TRAILING_AMOUNT, group: 1 },
    ];
}

/// A known company name with its precompiled matcher.
struct KnownCompany {
    canonical: String,
    matcher: Regex,
}

/// Read-only library of candidate patterns per field.
///
/// Regexes are compiled once and shared; the known-company table comes from
/// configuration at construction time and is never mutated afterwards, so
/// the library is safe to share across threads.
pub struct PatternLibrary {
    companies: Vec<KnownCompany>,
}

impl PatternLibrary {
    /// Build a library with the configured known-company table.
    pub fn new(config: &ExtractionConfig) -> Self {
        let companies = config
            .known_companies
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| KnownCompany {
                canonical: name.clone(),
                matcher: company_matcher(name),
            })
            .collect();

        Self { companies }
    }

    /// Ordered invoice-number patterns.
    pub fn invoice_no(&self) -> &'static [FieldPattern] {
        &INVOICE_NO_PATTERNS[..]
    }

    /// Ordered invoice-date patterns.
    pub fn invoice_date(&self) -> &'static [FieldPattern] {
        &INVOICE_DATE_PATTERNS[..]
    }

    /// Ordered structural company patterns (tried after known literals).
    pub fn company(&self) -> &'static [FieldPattern] {
        &COMPANY_PATTERNS[..]
    }

    /// Ordered total-due patterns.
    pub fn total_due(&self) -> &'static [FieldPattern] {
        &TOTAL_DUE_PATTERNS[..]
    }

    /// Match the known-company table against `text`.
    ///
    /// Returns the canonical stored spelling of the first configured
    /// company found, regardless of the casing or spacing the OCR engine
    /// produced.
    pub fn known_company(&self, text: &str) -> Option<&str> {
        self.companies
            .iter()
            .find(|c| c.matcher.is_match(text))
            .map(|c| c.canonical.as_str())
    }
}

/// Compile a whitespace-tolerant, case-insensitive matcher for one
/// canonical company name.
fn company_matcher(name: &str) -> Regex {
    let words: Vec<String> = name.split_whitespace().map(regex::escape).collect();
    RegexBuilder::new(&words.join(r"\s+"))
        .case_insensitive(true)
        .build()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_with(companies: &[&str]) -> PatternLibrary {
        PatternLibrary::new(&ExtractionConfig {
            known_companies: companies.iter().map(|s| s.to_string()).collect(),
            ..ExtractionConfig::default()
        })
    }

    #[test]
    fn test_known_company_restores_canonical_spelling() {
        let library = library_with(&["Sit Amet Corp"]);

        assert_eq!(
            library.known_company("SIT  AMET corp\nINVOICE #4821"),
            Some("Sit Amet Corp")
        );
        assert_eq!(library.known_company("unrelated text"), None);
    }

    #[test]
    fn test_known_company_order_is_configuration_order() {
        let library = library_with(&["Aliquam Srl", "Aliquam Srl Holdings"]);

        // First configured entry wins even when both match.
        assert_eq!(
            library.known_company("Aliquam Srl Holdings"),
            Some("Aliquam Srl")
        );
    }

    #[test]
    fn test_invoice_no_chain_order() {
        let library = library_with(&[]);
        let text = "INV-88 Invoice Number: 123";

        // The labeled pattern outranks the INV- prefix even though the
        // prefix appears first in the text.
        let m = super::super::first_match(library.invoice_no(), text).unwrap();
        assert_eq!(m.pattern, "invoice_no_labeled");
        assert_eq!(m.value, "123");
    }

    #[test]
    fn test_bare_hash_is_last_resort() {
        let library = library_with(&[]);
        let m = super::super::first_match(library.invoice_no(), "ref #4410").unwrap();
        assert_eq!(m.pattern, "invoice_no_hash");
        assert_eq!(m.value, "4410");
    }

    #[test]
    fn test_trailing_amount_only_at_end() {
        let library = library_with(&[]);

        let m = super::super::first_match(library.total_due(), "subtotal 10,00 then 1,250.00").unwrap();
        assert_eq!(m.pattern, "trailing_amount");
        assert_eq!(m.value, "1,250.00");

        assert!(super::super::first_match(library.total_due(), "1,250.00 and then words").is_none());
    }
}
