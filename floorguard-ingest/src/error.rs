//! Ingestion errors
//!
//! Two levels, handled very differently:
//!
//! - [`IngestError`] is batch-level and fatal. It aborts the ingestion call
//!   and is returned to the caller unchanged. It derives serde so the offload
//!   worker can send it back across the message boundary.
//! - [`RowError`] is row-level and recoverable. The row is skipped, the
//!   error is logged with its line number and collected in the report.

use floorguard_core::ReadingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for ingestion calls
pub type IngestResult<T> = Result<T, IngestError>;

/// Batch-level ingestion failures
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IngestError {
    /// Source path does not exist
    #[error("CSV file not found: {path}")]
    SourceNotFound {
        /// Path as given by the caller
        path: String,
    },

    /// Source has no content or could not be read
    #[error("CSV file is empty")]
    EmptySource,

    /// Source has a header but nothing after it
    #[error("CSV contains headers but no data rows")]
    NoDataRows,

    /// Header lacks columns the schema needs
    #[error("CSV missing required columns: {}", .missing.join(", "))]
    MissingColumns {
        /// Missing column names, in schema order
        missing: Vec<String>,
    },

    /// Every data row was rejected
    #[error("No valid rows could be parsed from CSV")]
    NoValidRows,

    /// Caller cancelled before ingestion completed
    #[error("Ingestion cancelled after {rows_applied} rows")]
    Cancelled {
        /// Rows committed before the cancellation was seen
        rows_applied: usize,
    },

    /// Offload worker failed outside the taxonomy above
    #[error("Ingestion worker failed: {message}")]
    Worker {
        /// Worker-side description
        message: String,
    },
}

impl IngestError {
    /// Build a worker failure from anything displayable
    pub fn worker(message: impl ToString) -> Self {
        Self::Worker {
            message: message.to_string(),
        }
    }
}

/// Row-level failure, tagged with its 1-based source line
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Row {line} error: {kind}")]
pub struct RowError {
    /// 1-based line number in the source, header included
    pub line: usize,
    /// What went wrong
    pub kind: RowErrorKind,
}

/// Why a row was skipped
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    /// Required field absent or blank
    #[error("missing field `{0}`")]
    MissingField(String),

    /// Reading did not validate
    #[error(transparent)]
    InvalidReading(#[from] ReadingError),
}

impl RowError {
    /// Tag a row failure with its line
    pub fn new(line: usize, kind: impl Into<RowErrorKind>) -> Self {
        Self {
            line,
            kind: kind.into(),
        }
    }
}
