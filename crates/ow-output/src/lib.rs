//! Processed-table store.
//!
//! Materialises the dimension and fact tables as typed Polars DataFrames,
//! writes them as CSV into the processed directory, and reads them back for
//! a standalone load.
//!
//! A write is all-or-nothing at the file level: the three tables are written
//! to temporary files first and only renamed into place once every one of
//! them has been written and synced.

mod error;
mod frames;
mod hash;
mod store;

pub use error::{OutputError, Result};
pub use frames::{
    dim_customers_frame, fct_order_items_frame, fct_orders_frame, table_frame,
    timestamp_column,
};
pub use hash::compute_file_hash;
pub use store::{WrittenTable, read_processed, write_processed};
