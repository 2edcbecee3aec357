//! Diagnostics sink for pipeline events.
//!
//! The pipeline never writes to a global logger directly; callers hand it a
//! [`Diagnostics`] implementation. The default [`LogDiagnostics`] forwards
//! events to `tracing` so CLI output matches the usual subscriber setup,
//! while tests can swap in [`CollectingDiagnostics`] and assert on events.

use std::sync::Mutex;

use tracing::{debug, error, info, warn};

/// A single pipeline event worth surfacing to an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A field pattern matched; records which pattern won.
    PatternMatched {
        invoice_id: String,
        field: &'static str,
        pattern: &'static str,
    },
    /// No pattern matched this field; carries the text for troubleshooting.
    FieldUnmatched {
        invoice_id: String,
        field: &'static str,
        text: String,
    },
    /// The invoice date was substituted with the processing date.
    DateFallback { invoice_id: String, raw: Option<String> },
    /// The company name was substituted with the configured sentinel.
    CompanyFallback { invoice_id: String },
    /// A record was dropped because a mandatory field was missing or invalid.
    RecordDropped { invoice_id: String, reason: String },
}

/// Sink for pipeline diagnostics.
pub trait Diagnostics {
    fn emit(&self, event: Event);
}

/// Default sink: forwards events to `tracing` at the severity each event
/// carries in the error-handling design (drops at error, date fallback at
/// warn, company fallback at info, pattern wins at debug).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn emit(&self, event: Event) {
        match event {
            Event::PatternMatched {
                invoice_id,
                field,
                pattern,
            } => {
                debug!(%invoice_id, field, pattern, "pattern matched");
            }
            Event::FieldUnmatched {
                invoice_id,
                field,
                text,
            } => {
                debug!(%invoice_id, field, %text, "no pattern matched");
            }
            Event::DateFallback { invoice_id, raw } => {
                warn!(%invoice_id, ?raw, "invoice date unrecoverable, using processing date");
            }
            Event::CompanyFallback { invoice_id } => {
                info!(%invoice_id, "company name unrecoverable, using sentinel");
            }
            Event::RecordDropped { invoice_id, reason } => {
                error!(%invoice_id, %reason, "record dropped");
            }
        }
    }
}

/// Test sink that records every event.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    events: Mutex<Vec<Event>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<Event> {
        let mut events = self.events.lock().expect("diagnostics lock");
        std::mem::take(&mut *events)
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn emit(&self, event: Event) {
        self.events.lock().expect("diagnostics lock").push(event);
    }
}
