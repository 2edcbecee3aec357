//! Date canonicalization for extracted invoice dates.

use chrono::{Local, NaiveDate};

/// Source notations accepted for invoice dates, in priority order.
///
/// The two-digit-year notations come first so that `15-03-25` resolves
/// through chrono's `%y` century pivot (00-68 -> 20xx, 69-99 -> 19xx)
/// instead of parsing as year 25 under `%Y`. The pivot is a known
/// ambiguity of two-digit years, inherited from the platform rule rather
/// than special-cased here.
pub const SOURCE_FORMATS: &[&str] = &[
    "%d-%m-%y",
    "%d/%m/%y",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y-%m-%d",
    "%d %B %Y",
    "%B %d, %Y",
];

/// A date in canonical DD-MM-YYYY notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDate {
    /// The resolved date.
    pub date: NaiveDate,
    /// True when no source notation matched and the processing date was
    /// substituted.
    pub fallback: bool,
}

impl NormalizedDate {
    /// Canonical zero-padded rendering.
    pub fn canonical(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }
}

/// Converts raw date substrings into canonical DD-MM-YYYY dates.
pub struct DateNormalizer {
    today: NaiveDate,
}

impl DateNormalizer {
    /// Create a normalizer using the current local date as the fallback.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Override the processing date (fallback value).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Normalize a raw date capture.
    ///
    /// The first source notation that parses wins. Absent or unparseable
    /// input yields the processing date with the fallback flag set; the
    /// caller decides whether to log or reject.
    pub fn normalize(&self, raw: Option<&str>) -> NormalizedDate {
        if let Some(raw) = raw {
            let raw = raw.trim();
            for format in SOURCE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                    return NormalizedDate {
                        date,
                        fallback: false,
                    };
                }
            }
        }

        NormalizedDate {
            date: self.today,
            fallback: true,
        }
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
