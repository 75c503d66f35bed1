//! Locale-tolerant numeric coercion.
//!
//! Source data uses thousands separators (`"1,234.5"`), so plain
//! `f64` parsing is not enough. Two policies coexist deliberately:
//! [`is_numeric`] is a strict gate (used when non-numeric cells must
//! be skipped), while [`to_number`] falls back to `0.0` on malformed
//! input (used by record import, where dropping a whole row over one
//! bad cell would be too strict).

use crate::cell::CellValue;

/// Check whether a cell "looks numeric": strip every comma from its
/// display form and test for a finite `f64` parse. Null cells and
/// empty strings are not numeric.
#[must_use]
pub fn is_numeric(value: &CellValue) -> bool {
    match value {
        CellValue::Null | CellValue::Bool(_) => false,
        CellValue::Int(_) => true,
        CellValue::Float(f) => f.is_finite(),
        CellValue::String(s) => {
            if s.trim().is_empty() {
                return false;
            }
            parse_stripped(s).is_some()
        }
    }
}

/// Coerce a cell to `f64`, stripping thousands separators first.
/// Returns `0.0` when the cell does not parse.
#[must_use]
pub fn to_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Null | CellValue::Bool(_) => 0.0,
        CellValue::Int(i) => *i as f64,
        CellValue::Float(f) => {
            if f.is_finite() {
                *f
            } else {
                0.0
            }
        }
        CellValue::String(s) => parse_stripped(s).unwrap_or(0.0),
    }
}

pub(crate) fn parse_stripped(s: &str) -> Option<f64> {
    let stripped: String = s.chars().filter(|&c| c != ',').collect();
    stripped.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}
