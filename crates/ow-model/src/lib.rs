//! Order warehouse data model.
//!
//! # Module Organization
//!
//! - [`table`]: Raw and processed table identities and their column schemas
//! - [`raw`]: Records as they arrive from the raw extracts (text cells)
//! - [`processed`]: Typed records of the dimension and fact tables

pub mod processed;
pub mod raw;
pub mod table;

pub use processed::{DimCustomer, FctOrder, FctOrderItem, OrderAggregate, ProcessedTables};
pub use raw::{RawCustomer, RawOrder, RawOrderItem, RawTables};
pub use table::{ProcessedTable, RawTable};
