//! Field extraction: applies the pattern library to raw OCR text.

use super::{first_match, FieldMatch, PatternLibrary};

/// Raw field captures from one invoice's OCR text.
///
/// Values are untouched matched substrings; normalization happens
/// afterwards. A `None` means no pattern in the priority chain matched.
/// Whether a missing field is fatal is the record builder's decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Captured invoice number digits.
    pub invoice_no: Option<FieldMatch>,

    /// Captured date substring, not yet canonicalized.
    pub invoice_date: Option<FieldMatch>,

    /// Captured company name, canonical when a known literal matched.
    pub company_name: Option<FieldMatch>,

    /// Captured amount substring, not yet canonicalized.
    pub total_due: Option<FieldMatch>,
}

impl ExtractedFields {
    /// Field name / match pairs, for diagnostics.
    pub fn iter(&self) -> [(&'static str, Option<&FieldMatch>); 4] {
        [
            ("invoice_no", self.invoice_no.as_ref()),
            ("invoice_date", self.invoice_date.as_ref()),
            ("company_name", self.company_name.as_ref()),
            ("total_due", self.total_due.as_ref()),
        ]
    }
}

/// Applies the pattern library against OCR text, field by field.
pub struct FieldExtractor<'a> {
    library: &'a PatternLibrary,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// Run every field's priority chain over `text`.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            invoice_no: first_match(self.library.invoice_no(), text),
            invoice_date: first_match(self.library.invoice_date(), text),
            company_name: self.extract_company(text),
            total_due: first_match(self.library.total_due(), text),
        }
    }

    /// Known-company literals outrank every structural pattern, and a
    /// literal hit is reported in its canonical stored spelling.
    fn extract_company(&self, text: &str) -> Option<FieldMatch> {
        if let Some(canonical) = self.library.known_company(text) {
            return Some(FieldMatch {
                pattern: "company_known_literal",
                value: canonical.to_string(),
            });
        }

        first_match(self.library.company(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use pretty_assertions::assert_eq;

    fn extract_with(config: &ExtractionConfig, text: &str) -> ExtractedFields {
        let library = PatternLibrary::new(config);
        FieldExtractor::new(&library).extract(text)
    }

    fn extract(text: &str) -> ExtractedFields {
        extract_with(&ExtractionConfig::default(), text)
    }

    #[test]
    fn test_extract_labeled_invoice() {
        let fields = extract(
            "Dolor Sit Corp\nINVOICE\nInvoice #12345\nDate: 2024-03-15\nTotal 1,250.00",
        );

        assert_eq!(fields.invoice_no.as_ref().unwrap().value, "12345");
        assert_eq!(fields.invoice_date.as_ref().unwrap().value, "2024-03-15");
        assert_eq!(fields.total_due.as_ref().unwrap().value, "1,250.00");
    }

    #[test]
    fn test_invoice_no_fallback_chain() {
        assert_eq!(
            extract("INV-2024 Amount 10,00").invoice_no.unwrap().value,
            "2024"
        );
        assert_eq!(extract("#881 Amount 10,00").invoice_no.unwrap().value, "881");
        assert!(extract("no number here").invoice_no.is_none());
    }

    #[test]
    fn test_bare_date_found_anywhere() {
        let fields = extract("scrambled header 15/03/2024 more noise");
        let m = fields.invoice_date.unwrap();
        assert_eq!(m.pattern, "date_bare_dmy");
        assert_eq!(m.value, "15/03/2024");
    }

    #[test]
    fn test_company_known_literal_beats_structural() {
        let config = ExtractionConfig {
            known_companies: vec!["Lorem Ipsum LLC".to_string()],
            ..ExtractionConfig::default()
        };
        let fields = extract_with(&config, "lorem IPSUM llc\nBill To: Someone Else");

        let m = fields.company_name.unwrap();
        assert_eq!(m.pattern, "company_known_literal");
        assert_eq!(m.value, "Lorem Ipsum LLC");
    }

    #[test]
    fn test_company_structural_chain() {
        assert_eq!(
            extract("Vestibulum Ltd\nBill To: customer")
                .company_name
                .unwrap()
                .value,
            "Vestibulum Ltd"
        );
        assert_eq!(
            extract("To: Curae Partners").company_name.unwrap().value,
            "Curae Partners"
        );
        let att = extract("Att: J. Doe\nPellentesque Services\nmore text")
            .company_name
            .unwrap();
        assert_eq!(att.pattern, "company_att_next_line");
        assert_eq!(att.value, "Pellentesque Services");
        assert_eq!(
            extract("line one\nHabitant Corp\nline three")
                .company_name
                .unwrap()
                .value,
            "Habitant Corp"
        );
        assert!(extract("nothing that looks like a company").company_name.is_none());
    }

    #[test]
    fn test_total_chain() {
        assert_eq!(
            extract("Total Due: $2,339.00").total_due.unwrap().value,
            "2,339.00"
        );
        assert_eq!(
            extract("Amount 88,20").total_due.unwrap().value,
            "88,20"
        );
        let m = extract("line items then\n1.024,00").total_due.unwrap();
        assert_eq!(m.pattern, "trailing_amount");
        assert_eq!(m.value, "1.024,00");
        assert!(extract("no money anywhere").total_due.is_none());
    }
}
