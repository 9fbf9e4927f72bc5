//! Raw extract ingestion.
//!
//! This crate locates the three raw extracts (customers, orders, order items),
//! reads them into Polars DataFrames with every column typed as text, checks
//! that the required columns are present, and turns the frames into raw
//! records for the transform engine.
//!
//! Failures here are structural: a missing or unreadable extract, or a missing
//! required column, aborts the run before any table is produced.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ow_ingest::{RawSources, load_raw_tables};
//!
//! let sources = RawSources::in_dir(Path::new("data/raw"));
//! let raw = load_raw_tables(&sources)?;
//! println!("{} customers", raw.customers.len());
//! ```

mod csv;
mod discovery;
mod error;
mod records;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{CsvHeaders, read_csv_schema, read_csv_table, validate_encoding};

// === File Discovery ===
pub use discovery::RawSources;

// === Record Extraction ===
pub use records::{customers_from_frame, items_from_frame, load_raw_tables, orders_from_frame};
