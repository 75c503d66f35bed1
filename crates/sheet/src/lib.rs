//! Sheet/Book module for gridscope
//!
//! Provides the tabular data model for the ingestion engine: scalar
//! cell values, row-major sheets with a header-row convention, and
//! insertion-ordered books, plus the file I/O boundary (CSV, XLSX/XLS
//! decode, XLSX export).
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use gridscope_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Name", "Age", "City"],
//!     vec!["Alice", "30", "NYC"],
//!     vec!["Bob", "25", "LA"],
//! ]);
//!
//! assert_eq!(sheet.header_strings(), vec!["Name", "Age", "City"]);
//! assert_eq!(sheet.data_rows().len(), 2);
//! ```
//!
//! ## Numeric coercion
//!
//! Source data carries thousands separators; [`numeric`] handles
//! them:
//!
//! ```
//! use gridscope_sheet::{numeric, CellValue};
//!
//! assert!(numeric::is_numeric(&CellValue::from("1,234.5")));
//! assert_eq!(numeric::to_number(&CellValue::from("1,234.5")), 1234.5);
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use gridscope_sheet::Book;
//!
//! let book = Book::from_path("disclosures.xlsx").unwrap();
//! for (name, sheet) in book.sheets() {
//!     println!("{name}: {} rows", sheet.row_count());
//! }
//! ```

mod book;
mod cell;
mod csv;
mod error;
pub mod numeric;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
