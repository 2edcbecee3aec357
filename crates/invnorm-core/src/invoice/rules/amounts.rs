//! Amount canonicalization for extracted invoice totals.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ExtractionError;

/// An amount in canonical notation: `.` thousands separator, `,` decimal
/// marker, exactly two fraction digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAmount {
    /// Numeric value.
    pub value: Decimal,
    /// Canonical rendering, e.g. `1.500,00`.
    pub text: String,
}

/// Normalize a raw amount capture.
///
/// OCR output gives no reliable way to tell `1,234.56` from `1.234,56`, so
/// separator roles are inferred positionally: every `,` and `.` is
/// stripped and the last two remaining digits are the fractional part
/// (fewer than three digits means the whole string is a cents value).
/// This is a deliberate heuristic, kept from the source system; it is not
/// a general currency parser.
///
/// Fails only when the stripped string is empty or contains a non-digit.
pub fn normalize_amount(raw: &str) -> Result<NormalizedAmount, ExtractionError> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExtractionError::UnparseableAmount {
            raw: raw.to_string(),
        });
    }

    let cents = Decimal::from_str(&digits).map_err(|_| ExtractionError::UnparseableAmount {
        raw: raw.to_string(),
    })?;
    let value = cents / Decimal::ONE_HUNDRED;

    Ok(NormalizedAmount {
        text: format_amount(value),
        value,
    })
}

/// Render an amount in canonical notation (`1.234,56`).
pub fn format_amount(value: Decimal) -> String {
    let s = format!("{:.2}", value);
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}
