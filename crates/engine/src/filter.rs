//! Case-insensitive full-text search across sheets.
//!
//! Filtering never mutates the source sheet; a [`FilteredView`] is an
//! ephemeral projection recomputed whenever the term or the data
//! changes.

use gridscope_sheet::{Book, CellValue, Sheet};

/// A per-sheet projection: headers verbatim plus the data rows
/// matching the current search term.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub headers: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl FilteredView {
    /// Number of matching data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Filter one sheet's data rows. The empty term is the identity
/// transform: "no filter" is a distinct state from "filter matching
/// nothing", so it short-circuits before any cell is inspected.
#[must_use]
pub fn filter_sheet(sheet: &Sheet, term: &str) -> FilteredView {
    let headers = sheet.headers().to_vec();

    if term.is_empty() {
        return FilteredView {
            headers,
            rows: sheet.data_rows().to_vec(),
        };
    }

    let needle = term.to_lowercase();
    let rows = sheet
        .data_rows()
        .iter()
        .filter(|row| row_matches(row, &needle))
        .cloned()
        .collect();

    FilteredView { headers, rows }
}

/// Filter every sheet of a book, preserving sheet order.
#[must_use]
pub fn filter_book(book: &Book, term: &str) -> Vec<(String, FilteredView)> {
    book.sheets()
        .map(|(name, sheet)| (name.clone(), filter_sheet(sheet, term)))
        .collect()
}

fn row_matches(row: &[CellValue], needle: &str) -> bool {
    row.iter()
        .any(|cell| !cell.is_null() && cell.as_str().to_lowercase().contains(needle))
}
