//! Schema-driven extraction of transaction records from the first
//! sheet of a workbook.
//!
//! The header-to-field mapping is a fixed dictionary: canonical
//! (trimmed, upper-cased) labels matched exactly. Row-level anomalies
//! are dropped silently; only an unrecognizable header row is an
//! error, and even that leaves the raw book available to the caller.

use crate::error::{EngineError, Result};
use gridscope_sheet::{numeric, CellValue, Sheet};
use serde::Serialize;

/// Typed fields a header column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Symbol,
    AcquirerDisposer,
    NumSecurities,
    Value,
    TransactionType,
    Date,
}

/// The fixed header vocabulary. Labels are matched after
/// canonicalization, so `" symbol "` still maps to [`Field::Symbol`].
pub(crate) const HEADER_FIELDS: [(&str, Field); 6] = [
    ("SYMBOL", Field::Symbol),
    ("NAME OF THE ACQUIRER/DISPOSER", Field::AcquirerDisposer),
    ("NO. OF SECURITIES (ACQUIRED/DISCLOSED)", Field::NumSecurities),
    ("VALUE OF SECURITY (ACQUIRED/DISCLOSED)", Field::Value),
    ("ACQUISITION/DISPOSAL TRANSACTION TYPE", Field::TransactionType),
    ("DATE OF ALLOTMENT/ACQUISITION FROM", Field::Date),
];

/// Minimum number of recognized headers for a sheet to count as a
/// transaction sheet.
pub const MIN_SCHEMA_MATCHES: usize = 3;

/// One extracted transaction. Created at ingestion time, immutable
/// thereafter. String fields are empty when the source cell was
/// absent; `date` stays free-form text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub symbol: String,
    pub acquirer_disposer: String,
    pub num_securities: f64,
    pub value: f64,
    pub transaction_type: String,
    pub date: String,
}

fn canonical(label: &str) -> String {
    label.trim().to_uppercase()
}

/// Map header positions to fields. Columns are matched positionally;
/// when a label appears twice, the first occurrence claims the field.
fn map_columns(headers: &[CellValue]) -> Vec<(usize, Field)> {
    let mut mapping: Vec<(usize, Field)> = Vec::new();

    for (col, header) in headers.iter().enumerate() {
        let label = canonical(&header.as_str());
        let Some(&(_, field)) = HEADER_FIELDS.iter().find(|(name, _)| *name == label) else {
            continue;
        };
        if mapping.iter().any(|&(_, claimed)| claimed == field) {
            continue;
        }
        mapping.push((col, field));
    }

    mapping
}

/// Extract transaction records from the first sheet's normalized view.
///
/// Fails with [`EngineError::Schema`] when fewer than
/// [`MIN_SCHEMA_MATCHES`] known headers are present. Individual rows
/// are dropped (never errors) when no mapped field is populated, the
/// symbol is empty, or the value is negative; sparse footer rows are
/// expected in source files. Malformed numeric cells coerce to 0
/// rather than rejecting the row.
pub fn extract_transactions(sheet: &Sheet) -> Result<Vec<TransactionRecord>> {
    let mapping = map_columns(sheet.headers());
    if mapping.len() < MIN_SCHEMA_MATCHES {
        return Err(EngineError::Schema {
            found: mapping.len(),
            known: HEADER_FIELDS.len(),
            required: MIN_SCHEMA_MATCHES,
        });
    }

    let mut records = Vec::new();

    for (row_idx, row) in sheet.data_rows().iter().enumerate() {
        let mut populated = 0usize;
        let mut record = TransactionRecord::default();

        for &(col, field) in &mapping {
            // Short rows simply lack the trailing cells
            let Some(cell) = row.get(col) else { continue };
            if cell.is_null() {
                continue;
            }
            populated += 1;

            match field {
                Field::Symbol => record.symbol = cell.as_str(),
                Field::AcquirerDisposer => record.acquirer_disposer = cell.as_str(),
                Field::NumSecurities => record.num_securities = numeric::to_number(cell),
                Field::Value => record.value = numeric::to_number(cell),
                Field::TransactionType => record.transaction_type = cell.as_str(),
                Field::Date => record.date = cell.as_str(),
            }
        }

        if populated == 0 || record.symbol.is_empty() || record.value < 0.0 {
            tracing::debug!(row = row_idx + 1, "dropping sparse or invalid row");
            continue;
        }

        records.push(record);
    }

    Ok(records)
}
