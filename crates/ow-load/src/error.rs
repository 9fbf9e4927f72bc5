//! Error types for the Postgres sink.

use ow_model::ProcessedTable;
use thiserror::Error;

/// Errors raised while loading into Postgres.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Schema or table name is not a plain SQL identifier.
    #[error("invalid SQL identifier '{name}'")]
    InvalidIdentifier { name: String },

    /// Connection settings are unusable.
    #[error("invalid connection settings: {message}")]
    InvalidConfig { message: String },

    /// Database unreachable after every retry.
    #[error("could not connect to {target} after {attempts} attempt(s): {source}")]
    Connect {
        target: String,
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    /// A statement against one table failed; the transaction is rolled back.
    #[error("failed to {operation} {table}: {source}")]
    Table {
        operation: &'static str,
        table: ProcessedTable,
        #[source]
        source: sqlx::Error,
    },

    /// Other database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, LoadError>;
