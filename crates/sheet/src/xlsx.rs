use crate::book::Book;
use crate::cell::CellValue;
use crate::csv::CsvOptions;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Column width applied to every written column. Serialized output
/// uses one fixed width rather than per-column measurement.
const EXPORT_COLUMN_WIDTH: f64 = 20.0;

/// Convert calamine Data to CellValue
///
/// Error cells behave like blanks downstream (filtering, aggregation),
/// so they map to `Null` rather than an error marker string.
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => CellValue::String(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

impl Book {
    /// Load a book from an Excel workbook (all sheets). Handles both
    /// `.xlsx` and `.xls` via format auto-detection.
    pub fn from_workbook_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook =
            open_workbook_auto(path).map_err(|e| SheetError::Workbook(e.to_string()))?;

        let book_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Book1")
            .to_string();
        let mut book = Book::with_name(&book_name);

        let sheet_names = workbook.sheet_names().to_vec();
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| SheetError::Workbook(e.to_string()))?;

            let data: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(data_to_cell_value).collect())
                .collect();

            let mut sheet = Sheet::with_name(&sheet_name);
            *sheet.data_mut() = data;
            book.add_sheet(&sheet_name, sheet)?;
        }

        tracing::debug!(
            sheets = book.sheet_count(),
            "decoded workbook {}",
            path.display()
        );
        Ok(book)
    }

    /// Load a book from a file path, dispatching on extension:
    /// `.csv`/`.tsv` load as a one-sheet book, anything else goes
    /// through the workbook decoder.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| SheetError::UnsupportedExtension {
                path: path.display().to_string(),
            })?;

        match ext.as_str() {
            "csv" => Book::from_csv_path(path, CsvOptions::default()),
            "tsv" => Book::from_csv_path(path, CsvOptions::tsv()),
            "xlsx" | "xls" => Book::from_workbook_path(path),
            _ => Err(SheetError::UnsupportedExtension {
                path: path.display().to_string(),
            }),
        }
    }

    /// Save the book to an Excel file with fixed column widths
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(name)
                .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;

            for (row_idx, row) in sheet.data().iter().enumerate() {
                for (col_idx, cell) in row.iter().enumerate() {
                    let row_num = u32::try_from(row_idx)
                        .map_err(|_| SheetError::XlsxWrite("row index overflow".to_string()))?;
                    let col_num = u16::try_from(col_idx)
                        .map_err(|_| SheetError::XlsxWrite("column index overflow".to_string()))?;

                    match cell {
                        CellValue::Null => {} // Leave empty
                        CellValue::Bool(b) => {
                            worksheet
                                .write_boolean(row_num, col_num, *b)
                                .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;
                        }
                        CellValue::Int(i) => {
                            // Excel stores all numbers as f64; integers
                            // beyond 2^53 may lose precision
                            worksheet
                                .write_number(row_num, col_num, *i as f64)
                                .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;
                        }
                        CellValue::Float(f) => {
                            worksheet
                                .write_number(row_num, col_num, *f)
                                .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;
                        }
                        CellValue::String(s) => {
                            worksheet
                                .write_string(row_num, col_num, s)
                                .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;
                        }
                    }
                }
            }

            let col_count = sheet.col_count();
            for col_idx in 0..col_count {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| SheetError::XlsxWrite("column index overflow".to_string()))?;
                worksheet
                    .set_column_width(col_num, EXPORT_COLUMN_WIDTH)
                    .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;
            }
        }

        workbook
            .save(path.as_ref())
            .map_err(|e| SheetError::XlsxWrite(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xlsx");

        let mut book = Book::new();
        book.add_sheet(
            "Data",
            Sheet::from_data(vec![
                vec!["Name", "Age"],
                vec!["Alice", "30"],
                vec!["Bob", "25"],
            ]),
        )
        .unwrap();

        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_workbook_path(&path).unwrap();
        assert_eq!(loaded.sheet_count(), 1);
        let sheet = loaded.get_sheet("Data").unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.header_strings(), vec!["Name", "Age"]);
    }

    #[test]
    fn test_multi_sheet_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.xlsx");

        let mut book = Book::new();
        book.add_sheet("Numbers", Sheet::from_data(vec![vec![1, 2, 3]]))
            .unwrap();
        book.add_sheet("Letters", Sheet::from_data(vec![vec!["a", "b", "c"]]))
            .unwrap();

        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_workbook_path(&path).unwrap();
        assert_eq!(loaded.sheet_names(), vec!["Numbers", "Letters"]);
    }

    #[test]
    fn test_value_types_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.xlsx");

        let mut book = Book::new();
        let mut sheet = Sheet::new();
        *sheet.data_mut() = vec![vec![
            CellValue::String("text".to_string()),
            CellValue::Int(42),
            CellValue::Float(2.5),
            CellValue::Bool(true),
        ]];
        book.add_sheet("Types", sheet).unwrap();
        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_workbook_path(&path).unwrap();
        let sheet = loaded.get_sheet("Types").unwrap();

        assert!(matches!(sheet.get(0, 0).unwrap(), CellValue::String(s) if s == "text"));
        // Int comes back as Float from Excel
        assert!(matches!(sheet.get(0, 1).unwrap(), CellValue::Float(f) if (*f - 42.0).abs() < 0.01));
        assert!(matches!(sheet.get(0, 2).unwrap(), CellValue::Float(f) if (*f - 2.5).abs() < 0.01));
        assert!(matches!(sheet.get(0, 3).unwrap(), CellValue::Bool(true)));
    }

    #[test]
    fn test_from_path_dispatch() {
        let dir = tempdir().unwrap();

        let csv_path = dir.path().join("data.csv");
        Sheet::from_data(vec![vec!["h"], vec!["1"]])
            .save_as_csv(&csv_path)
            .unwrap();
        let book = Book::from_path(&csv_path).unwrap();
        assert_eq!(book.sheet_names(), vec!["data"]);

        let xlsx_path = dir.path().join("data.xlsx");
        let mut wb = Book::new();
        wb.add_sheet("S", Sheet::from_data(vec![vec![1]])).unwrap();
        wb.save_as_xlsx(&xlsx_path).unwrap();
        assert_eq!(Book::from_path(&xlsx_path).unwrap().sheet_count(), 1);

        let bad = dir.path().join("data.pdf");
        assert!(matches!(
            Book::from_path(&bad),
            Err(SheetError::UnsupportedExtension { .. })
        ));
    }
}
