//! Error types for raw extract ingestion.

use std::path::PathBuf;

use ow_model::RawTable;
use thiserror::Error;

/// Errors that can occur while ingesting the raw extracts.
///
/// Every variant is fatal for a run: the pipeline never starts on a partial
/// set of inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Raw directory not found or not a directory.
    #[error("raw directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Raw extract not found.
    #[error("{table} extract not found: {path}")]
    FileNotFound { table: RawTable, path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header line.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header line has no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    // === Schema Errors ===
    /// Required column absent from an extract.
    #[error("{table} extract {path} is missing required column '{column}'")]
    MissingColumn {
        table: RawTable,
        column: String,
        path: PathBuf,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            table: RawTable::Orders,
            path: PathBuf::from("/data/raw/orders.csv"),
        };
        assert_eq!(err.to_string(), "orders extract not found: /data/raw/orders.csv");
    }

    #[test]
    fn test_missing_column_display() {
        let err = IngestError::MissingColumn {
            table: RawTable::OrderItems,
            column: "unit_price".to_string(),
            path: PathBuf::from("items.csv"),
        };
        assert_eq!(
            err.to_string(),
            "order_items extract items.csv is missing required column 'unit_price'"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
