//! The invoice normalization pipeline: extract, normalize, build.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::diagnostics::{Diagnostics, Event, LogDiagnostics};
use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, PipelineConfig};
use crate::models::record::{Degradation, InvoiceRecord};

use super::rules::{
    amounts::normalize_amount,
    dates::DateNormalizer,
    fields::FieldExtractor,
    PatternLibrary,
};
use super::Result;

/// Turns one invoice's OCR text into a normalized [`InvoiceRecord`].
///
/// Stateless across calls; a single pipeline may be shared by concurrent
/// callers. Per-invoice failures are returned to the caller, never
/// escalated: a batch keeps going when one invoice is unreadable.
pub struct InvoicePipeline {
    library: PatternLibrary,
    extraction: ExtractionConfig,
    dates: DateNormalizer,
    diagnostics: Arc<dyn Diagnostics + Send + Sync>,
}

impl InvoicePipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline from configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let extraction = config.extraction;
        Self {
            library: PatternLibrary::new(&extraction),
            extraction,
            dates: DateNormalizer::new(),
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// Override the processing date used when no invoice date is found.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.dates = DateNormalizer::new().with_today(today);
        self
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics + Send + Sync>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Process one invoice.
    ///
    /// `id` and `due_date` come from the upstream collaborator; `text` is
    /// the OCR engine's output for the invoice image. Returns an error
    /// when a mandatory field (invoice number, total) cannot be recovered;
    /// the record is then dropped and the caller continues with the next
    /// invoice. Date and company fallbacks keep the record and are
    /// reported through the diagnostics sink.
    pub fn process(&self, id: &str, due_date: &str, text: &str) -> Result<InvoiceRecord> {
        let fields = FieldExtractor::new(&self.library).extract(text);

        for (field, matched) in fields.iter() {
            match matched {
                Some(m) => self.diagnostics.emit(Event::PatternMatched {
                    invoice_id: id.to_string(),
                    field,
                    pattern: m.pattern,
                }),
                None => self.diagnostics.emit(Event::FieldUnmatched {
                    invoice_id: id.to_string(),
                    field,
                    text: text.to_string(),
                }),
            }
        }

        let invoice_no = match fields.invoice_no {
            Some(m) => m.value,
            None => return Err(self.drop_record(id, "invoice_no")),
        };

        let total_due = match fields.total_due {
            Some(m) => m.value,
            None => return Err(self.drop_record(id, "total_due")),
        };
        let total = normalize_amount(&total_due).map_err(|e| {
            self.diagnostics.emit(Event::RecordDropped {
                invoice_id: id.to_string(),
                reason: e.to_string(),
            });
            e
        })?;

        let mut degradations = Vec::new();

        let raw_date = fields.invoice_date.map(|m| m.value);
        let date = self.dates.normalize(raw_date.as_deref());
        if date.fallback {
            degradations.push(Degradation::Date);
            self.diagnostics.emit(Event::DateFallback {
                invoice_id: id.to_string(),
                raw: raw_date,
            });
        }

        let company_name = match fields.company_name {
            Some(m) => m.value,
            None => {
                degradations.push(Degradation::Company);
                self.diagnostics.emit(Event::CompanyFallback {
                    invoice_id: id.to_string(),
                });
                self.extraction.company_sentinel.clone()
            }
        };

        Ok(InvoiceRecord {
            id: id.to_string(),
            due_date: due_date.to_string(),
            invoice_no,
            invoice_date: date.canonical(),
            company_name,
            total_due: total.text,
            degradations,
        })
    }

    fn drop_record(&self, id: &str, field: &'static str) -> ExtractionError {
        let err = ExtractionError::MissingRequiredField { field };
        self.diagnostics.emit(Event::RecordDropped {
            invoice_id: id.to_string(),
            reason: err.to_string(),
        });
        err
    }
}

impl Default for InvoicePipeline {
    fn default() -> Self {
        Self::new()
    }
}
