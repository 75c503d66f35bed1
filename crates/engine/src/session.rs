//! The load session: one decoded file plus the exploration state
//! layered on top of it.
//!
//! The source book and extracted records are immutable for the life
//! of the session. Every derived view (filtered rows, summable
//! columns, aggregates, ratio) is recomputed from scratch on access;
//! nothing derived is stored, so views can never go stale.

use crate::aggregate::{self, ColumnAggregate, ColumnSelection, RatioResult};
use crate::error::{EngineError, Result};
use crate::filter::{self, FilteredView};
use crate::infer;
use crate::schema::{self, TransactionRecord};
use crate::summary::{self, SummaryEntry};
use gridscope_sheet::Book;
use std::path::{Path, PathBuf};

/// One loaded file and its exploration state.
#[derive(Debug)]
pub struct Session {
    book: Book,
    records: Vec<TransactionRecord>,
    schema_error: Option<EngineError>,
    file_base_name: String,
    active_sheet: Option<String>,
    selection: ColumnSelection,
    search_term: String,
}

impl Session {
    /// Load and decode a file off the async runtime's blocking pool.
    ///
    /// Decode failures are fatal. A schema mismatch is not: the raw
    /// book is kept for inspection, records stay empty, and the
    /// schema error is recorded on the session.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let base_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("workbook")
            .to_string();

        let book = tokio::task::spawn_blocking(move || Book::from_path(&path))
            .await
            .map_err(|e| EngineError::Task(e.to_string()))??;

        Ok(Self::from_book(book, base_name))
    }

    /// Build a session from an already-decoded book.
    #[must_use]
    pub fn from_book(book: Book, file_base_name: String) -> Self {
        let (records, schema_error) = match book.first_sheet() {
            // An empty workbook is not a schema failure; there was
            // nothing to match against
            None => (Vec::new(), None),
            Some(sheet) => match schema::extract_transactions(sheet) {
                Ok(records) => (records, None),
                Err(err) => {
                    tracing::warn!("transaction extraction failed: {err}");
                    (Vec::new(), Some(err))
                }
            },
        };

        let active_sheet = book.sheet_names().first().map(|s| (*s).to_string());

        Session {
            book,
            records,
            schema_error,
            file_base_name,
            active_sheet,
            selection: ColumnSelection::new(),
            search_term: String::new(),
        }
    }

    // ===== Source accessors =====

    #[must_use]
    pub fn book(&self) -> &Book {
        &self.book
    }

    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The schema error recorded at load time, if extraction failed
    #[must_use]
    pub fn schema_error(&self) -> Option<&EngineError> {
        self.schema_error.as_ref()
    }

    /// File stem of the loaded file, for naming exports
    #[must_use]
    pub fn file_base_name(&self) -> &str {
        &self.file_base_name
    }

    /// True when there is nothing at all to show: no sheets and no
    /// records. Callers present this as the hard-error state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.book.is_empty() && self.records.is_empty()
    }

    // ===== Exploration state transitions =====

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    #[must_use]
    pub fn active_sheet_name(&self) -> Option<&str> {
        self.active_sheet.as_deref()
    }

    /// Switch the active sheet. The column selection is sheet-scoped
    /// and resets atomically with the switch.
    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        if !self.book.has_sheet(name) {
            return Err(EngineError::SheetNotFound {
                name: name.to_string(),
            });
        }
        self.active_sheet = Some(name.to_string());
        self.selection.clear();
        Ok(())
    }

    /// Toggle a column in the aggregation selection. Selecting a
    /// column that is not summable in the current view is a no-op;
    /// deselecting an already-selected column always succeeds, even
    /// when a later search change made it non-summable.
    pub fn toggle_column(&mut self, col: usize) {
        if !self.selection.contains(col) {
            let summable = self.summable_columns();
            if !summable.get(col).copied().unwrap_or(false) {
                tracing::debug!(col, "ignoring selection of non-summable column");
                return;
            }
        }
        self.selection.toggle(col);
    }

    #[must_use]
    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    // ===== Derived views (recomputed per call) =====

    /// The active sheet filtered by the current search term
    #[must_use]
    pub fn filtered_view(&self) -> Option<FilteredView> {
        let name = self.active_sheet.as_deref()?;
        let sheet = self.book.get_sheet(name).ok()?;
        Some(filter::filter_sheet(sheet, &self.search_term))
    }

    /// Every sheet filtered by the current search term, in order
    #[must_use]
    pub fn filtered_views(&self) -> Vec<(String, FilteredView)> {
        filter::filter_book(&self.book, &self.search_term)
    }

    /// Summable classification for the active sheet's filtered rows
    #[must_use]
    pub fn summable_columns(&self) -> Vec<bool> {
        match self.filtered_view() {
            Some(view) => infer::summable_columns(&view.rows, view.headers.len()),
            None => Vec::new(),
        }
    }

    /// Aggregates for the selected columns, in selection order
    #[must_use]
    pub fn aggregates(&self) -> Vec<(usize, ColumnAggregate)> {
        match self.filtered_view() {
            Some(view) => aggregate::aggregate_selection(&view.rows, &self.selection),
            None => Vec::new(),
        }
    }

    /// The two-column ratio, when exactly two columns are selected
    #[must_use]
    pub fn ratio(&self) -> Option<RatioResult> {
        let view = self.filtered_view()?;
        aggregate::ratio(&view.rows, &self.selection)
    }

    /// Records sorted by value descending (stable within equal values)
    #[must_use]
    pub fn sorted_records(&self) -> Vec<TransactionRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Top-N per-symbol totals, the input to the summarizer port
    #[must_use]
    pub fn summary_entries(&self, top_n: usize) -> Vec<SummaryEntry> {
        summary::summary_entries(&self.records, top_n)
    }
}
