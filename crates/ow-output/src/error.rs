//! Error types for the processed-table store.

use std::path::PathBuf;

use ow_ingest::IngestError;
use ow_model::ProcessedTable;
use thiserror::Error;

/// Errors raised while writing or reading processed tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A temporary file could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars could not serialise a table.
    #[error("failed to write {table} to {path}: {message}")]
    CsvWrite {
        table: ProcessedTable,
        path: PathBuf,
        message: String,
    },

    /// A processed file could not be read back.
    #[error(transparent)]
    Read(#[from] IngestError),

    /// Processed file lacks one of its output columns.
    #[error("{table} file {path} is missing column '{column}'")]
    MissingColumn {
        table: ProcessedTable,
        column: String,
        path: PathBuf,
    },

    /// A non-nullable cell of a processed file does not parse.
    #[error("{table} row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        table: ProcessedTable,
        column: &'static str,
        row: usize,
        value: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, OutputError>;
