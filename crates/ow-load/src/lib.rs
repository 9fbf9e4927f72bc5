//! Postgres sink for the processed tables.
//!
//! Each load is a full refresh: inside one transaction the target schema is
//! created if needed, then every table is dropped, recreated and filled with
//! batched multi-row inserts. Either all three tables are replaced or none is.
//!
//! # Example
//!
//! ```ignore
//! use ow_load::{PgConfig, connect, load_tables};
//!
//! let config = PgConfig::new("localhost", 5432, "warehouse", "etl", "secret");
//! let pool = connect(&config).await?;
//! let report = load_tables(&pool, &config.schema, &tables).await?;
//! ```

mod config;
mod error;
mod loader;
pub mod sql;

pub use config::{DEFAULT_SCHEMA, PgConfig};
pub use error::{LoadError, Result};
pub use loader::{LoadReport, LoadedTable, SinkRow, connect, load_tables, retry_delay};
