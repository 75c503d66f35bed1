use crate::cell::CellValue;
use crate::error::{Result, SheetError};

/// A sheet representing a 2D grid of cells (row-major storage)
///
/// Rows may be ragged: source files routinely omit trailing cells, so
/// a cell index at or beyond a row's length reads as absent rather
/// than an error. Row 0 is the header row by convention; the
/// normalized view is exposed through [`Sheet::headers`] and
/// [`Sheet::data_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue> + Clone>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns (header-row convention: the first
    /// row's length; later rows may be shorter)
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the raw data
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable access to the raw data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    /// Append a row to the sheet
    pub fn push_row<T: Into<CellValue>>(&mut self, row: Vec<T>) {
        self.data.push(row.into_iter().map(Into::into).collect());
    }

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell value, treating out-of-range positions as absent
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Null)
    }

    // ===== Normalized view =====

    /// The header row (row 0), or an empty slice for a sheet with no rows
    #[must_use]
    pub fn headers(&self) -> &[CellValue] {
        self.data.first().map_or(&[], Vec::as_slice)
    }

    /// Header labels in display form, index-aligned to cell positions.
    /// Duplicate labels are legal and preserved positionally.
    #[must_use]
    pub fn header_strings(&self) -> Vec<String> {
        self.headers().iter().map(CellValue::as_str).collect()
    }

    /// All rows after the header row
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.data.is_empty() {
            &[]
        } else {
            &self.data[1..]
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let sheet = Sheet::from_data(vec![
            vec!["Name", "Age", "City"],
            vec!["Alice", "30", "NYC"],
            vec!["Bob", "25", "LA"],
        ]);

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(
            sheet.get(1, 0).unwrap(),
            &CellValue::String("Alice".to_string())
        );
    }

    #[test]
    fn test_normalized_view() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("h1"), CellValue::from("h2")],
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::Int(2), CellValue::from("b")],
        ]);

        assert_eq!(sheet.header_strings(), vec!["h1", "h2"]);
        assert_eq!(sheet.data_rows().len(), 2);
        assert_eq!(sheet.data_rows()[0][0], CellValue::Int(1));
    }

    #[test]
    fn test_empty_sheet_view() {
        let sheet = Sheet::new();
        assert!(sheet.headers().is_empty());
        assert!(sheet.data_rows().is_empty());
        assert_eq!(sheet.col_count(), 0);
    }

    #[test]
    fn test_header_only_sheet() {
        let sheet = Sheet::from_data(vec![vec!["a", "b"]]);
        assert_eq!(sheet.header_strings(), vec!["a", "b"]);
        assert!(sheet.data_rows().is_empty());
    }

    #[test]
    fn test_ragged_rows_read_as_absent() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("h1"), CellValue::from("h2")],
            vec![CellValue::Int(1)],
        ]);

        assert_eq!(sheet.cell(1, 0), &CellValue::Int(1));
        assert_eq!(sheet.cell(1, 1), &CellValue::Null);
        assert!(sheet.get(1, 1).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let sheet = Sheet::from_data(vec![vec![1, 2]]);
        assert!(matches!(
            sheet.get(5, 0),
            Err(SheetError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_duplicate_headers_preserved() {
        let sheet = Sheet::from_data(vec![vec!["x", "x", "y"]]);
        assert_eq!(sheet.header_strings(), vec!["x", "x", "y"]);
    }
}
