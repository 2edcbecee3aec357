//! Invoice record model produced by the normalization pipeline.

use serde::{Deserialize, Serialize};

/// A non-fatal substitution applied while building a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Invoice date was unrecoverable; the processing date was used.
    Date,
    /// Company name was unrecoverable; the sentinel value was used.
    Company,
}

/// The terminal entity of a run: one fully normalized invoice.
///
/// `id` and `due_date` are supplied by the upstream collaborator; the four
/// remaining fields come out of the extraction pipeline. A record always
/// carries a non-empty invoice number and total; the other two fields may
/// hold defaults, in which case `degradations` says so.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Externally sourced invoice identifier.
    #[serde(rename = "ID")]
    pub id: String,

    /// Externally sourced due date, already in DD-MM-YYYY notation.
    #[serde(rename = "Due Date")]
    pub due_date: String,

    /// Extracted invoice number.
    #[serde(rename = "Invoice No")]
    pub invoice_no: String,

    /// Invoice date in canonical DD-MM-YYYY notation.
    #[serde(rename = "Invoice Date")]
    pub invoice_date: String,

    /// Company name, or the configured sentinel.
    #[serde(rename = "Company Name")]
    pub company_name: String,

    /// Total due in canonical notation (`.` thousands, `,` decimal).
    #[serde(rename = "Total Due")]
    pub total_due: String,

    /// Defaults substituted while building this record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl InvoiceRecord {
    /// Whether any field holds a fallback value instead of an extracted one.
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Column headers of the tabular export, in order.
    pub const HEADERS: [&'static str; 6] = [
        "ID",
        "Due Date",
        "Invoice No",
        "Invoice Date",
        "Company Name",
        "Total Due",
    ];

    /// The record's six column values, in header order.
    pub fn columns(&self) -> [&str; 6] {
        [
            &self.id,
            &self.due_date,
            &self.invoice_no,
            &self.invoice_date,
            &self.company_name,
            &self.total_due,
        ]
    }
}
