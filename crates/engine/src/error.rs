use gridscope_sheet::SheetError;
use thiserror::Error;

/// Errors surfaced by the ingestion and aggregation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The file could not be decoded at all. Fatal for the load.
    #[error("Failed to decode workbook: {0}")]
    Decode(#[from] SheetError),

    /// The first sheet does not look like a transaction sheet. Fatal
    /// for record extraction only: the raw book stays available.
    #[error("Transaction schema not recognized: matched {found} of {known} known headers (need at least {required})")]
    Schema {
        found: usize,
        known: usize,
        required: usize,
    },

    /// The external summarizer failed. Isolated: never invalidates
    /// already-computed records or views.
    #[error("Summary generation failed: {0}")]
    Summary(String),

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    /// The background decode task was cancelled or panicked.
    #[error("Decode task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
