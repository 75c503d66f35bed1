//! On-demand aggregates over user-selected columns.
//!
//! Everything here is recomputed in full from the current filtered
//! rows; nothing is cached or updated incrementally. Non-numeric
//! cells are excluded from `count` entirely, which is a different
//! leniency policy from record import's coerce-to-zero. The two
//! coexist on purpose.

use gridscope_sheet::{numeric, CellValue};
use serde::Serialize;

/// An ordered set of selected column indices.
///
/// Selection order matters: when exactly two columns are selected,
/// the earlier one becomes the ratio numerator. Toggling is
/// idempotent; re-selecting a column removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    ordered: Vec<usize>,
}

impl ColumnSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the column, or remove it if already selected
    pub fn toggle(&mut self, col: usize) {
        if let Some(pos) = self.ordered.iter().position(|&c| c == col) {
            self.ordered.remove(pos);
        } else {
            self.ordered.push(col);
        }
    }

    pub fn clear(&mut self) {
        self.ordered.clear();
    }

    #[must_use]
    pub fn contains(&self, col: usize) -> bool {
        self.ordered.contains(&col)
    }

    /// Selected indices in selection order
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.ordered
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Sum, count and average for one selected column. `count` is the
/// number of numeric cells; empty and malformed cells are skipped,
/// not treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnAggregate {
    pub sum: f64,
    pub count: usize,
    pub average: f64,
}

/// The two-column ratio outcome. A zero denominator yields the
/// explicit sentinel, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Ratio {
    Value(f64),
    NotApplicable,
}

/// Ratio of two selected columns. `numerator_col` is the
/// earlier-selected index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioResult {
    pub numerator_col: usize,
    pub denominator_col: usize,
    pub ratio: Ratio,
}

/// Aggregate one column over the given rows
#[must_use]
pub fn aggregate_column(rows: &[Vec<CellValue>], col: usize) -> ColumnAggregate {
    let mut sum = 0.0;
    let mut count = 0usize;

    for row in rows {
        let Some(cell) = row.get(col) else { continue };
        if numeric::is_numeric(cell) {
            sum += numeric::to_number(cell);
            count += 1;
        }
    }

    let average = if count > 0 { sum / count as f64 } else { 0.0 };
    ColumnAggregate { sum, count, average }
}

/// Aggregate every selected column, in selection order
#[must_use]
pub fn aggregate_selection(
    rows: &[Vec<CellValue>],
    selection: &ColumnSelection,
) -> Vec<(usize, ColumnAggregate)> {
    selection
        .indices()
        .iter()
        .map(|&col| (col, aggregate_column(rows, col)))
        .collect()
}

/// Compute the ratio of the first selected column's sum to the
/// second's. Exists only when exactly two columns are selected; the
/// quotient is left unrounded (rounding is a presentation concern).
#[must_use]
pub fn ratio(rows: &[Vec<CellValue>], selection: &ColumnSelection) -> Option<RatioResult> {
    let &[numerator_col, denominator_col] = selection.indices() else {
        return None;
    };

    let numerator = aggregate_column(rows, numerator_col).sum;
    let denominator = aggregate_column(rows, denominator_col).sum;

    let ratio = if denominator == 0.0 {
        Ratio::NotApplicable
    } else {
        Ratio::Value(numerator / denominator)
    };

    Some(RatioResult {
        numerator_col,
        denominator_col,
        ratio,
    })
}
