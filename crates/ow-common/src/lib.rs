//! Shared utilities for the order warehouse crates.
//!
//! This crate provides the tolerant value parsers used by every pipeline stage
//! and the Polars `AnyValue` helpers used when moving data in and out of
//! DataFrames.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_string, format_numeric, normalize_key, parse_f64, parse_i64};
