//! Tabular ingestion & aggregation engine for gridscope
//!
//! Takes a decoded workbook ([`gridscope_sheet::Book`]), extracts
//! typed transaction records against a fixed header vocabulary, and
//! supports interactive exploration on top of the raw sheets:
//! full-text search, per-column numeric inference, and on-demand
//! aggregates over user-selected columns.
//!
//! # Example
//!
//! ```
//! use gridscope_engine::Session;
//! use gridscope_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("Disclosures", Sheet::from_data(vec![
//!     vec!["SYMBOL", "VALUE OF SECURITY (ACQUIRED/DISCLOSED)", "ACQUISITION/DISPOSAL TRANSACTION TYPE"],
//!     vec!["TCS", "1,000", "Buy"],
//! ])).unwrap();
//!
//! let mut session = Session::from_book(book, "disclosures".to_string());
//! assert_eq!(session.records().len(), 1);
//!
//! session.set_search("tcs");
//! session.toggle_column(1);
//! assert_eq!(session.aggregates()[0].1.sum, 1000.0);
//! ```

mod aggregate;
mod error;
mod export;
mod filter;
mod infer;
mod schema;
mod session;
mod summary;

/// Re-export aggregation types.
pub use aggregate::{
    aggregate_column, aggregate_selection, ratio, ColumnAggregate, ColumnSelection, Ratio,
    RatioResult,
};
/// Re-export engine error types.
pub use error::{EngineError, Result};
/// Re-export the export-boundary helper.
pub use export::records_to_sheet;
/// Re-export search types.
pub use filter::{filter_book, filter_sheet, FilteredView};
/// Re-export column inference.
pub use infer::{summable_columns, SAMPLE_ROWS};
/// Re-export schema extraction.
pub use schema::{extract_transactions, TransactionRecord, MIN_SCHEMA_MATCHES};
/// Re-export the load session.
pub use session::Session;
/// Re-export summary types and the summarizer port.
pub use summary::{summary_entries, SummaryEntry, SummaryReport, Summarizer};
