//! Transform engine for the order warehouse.
//!
//! Turns the three raw extracts into the customer dimension and the two fact
//! tables in a single forward pass:
//!
//! 1. [`customers`]: normalize contact fields, keep the latest row per customer
//! 2. [`orders`]: drop orders whose customer is not in the dimension
//! 3. [`items`]: drop line items failing the quantity/price sanity rules
//! 4. [`aggregate`]: total the surviving items per order and join onto orders
//!
//! Every stage is total. Values that cannot be coerced become `None` and are
//! then filtered out or defaulted; nothing in this crate returns an error.
//! The engine holds no state, so [`run_pipeline`] is a pure function of its
//! input.

pub mod aggregate;
pub mod customers;
pub mod datetime;
pub mod items;
pub mod orders;
mod pipeline;

pub use aggregate::{aggregate_items, join_order_totals};
pub use customers::{clean_customer, dedup_customers};
pub use datetime::{format_timestamp, is_midnight, parse_timestamp};
pub use items::sanitize_items;
pub use orders::{ValidOrder, filter_orders, valid_customer_ids};
pub use pipeline::run_pipeline;
