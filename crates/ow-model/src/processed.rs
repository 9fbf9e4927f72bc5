//! Dimension and fact records produced by the pipeline.

use chrono::NaiveDateTime;

/// Customer dimension row: one per distinct `customer_id`.
///
/// `customer_id` is `None` only for the single row that collects customers whose
/// id could not be parsed; such a row never satisfies a referential check.
#[derive(Debug, Clone, PartialEq)]
pub struct DimCustomer {
    pub customer_id: Option<i64>,
    pub email: String,
    pub full_name: String,
    pub updated_at: Option<NaiveDateTime>,
}

/// Per-order totals over the surviving line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAggregate {
    pub order_id: String,
    pub order_total: f64,
    pub item_count: i64,
}

/// Order fact row. `customer_id` always references a [`DimCustomer`].
#[derive(Debug, Clone, PartialEq)]
pub struct FctOrder {
    pub order_id: String,
    pub customer_id: i64,
    pub order_date: Option<NaiveDateTime>,
    pub order_total: f64,
    pub item_count: i64,
}

/// Order line fact row. Invariant: `quantity >= 1` and `unit_price > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct FctOrderItem {
    pub order_id: String,
    pub product_sku: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// The three processed tables of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedTables {
    pub dim_customers: Vec<DimCustomer>,
    pub fct_orders: Vec<FctOrder>,
    pub fct_order_items: Vec<FctOrderItem>,
}

impl ProcessedTables {
    /// Row counts in emission order: dimension, orders, items.
    pub fn row_counts(&self) -> [usize; 3] {
        [
            self.dim_customers.len(),
            self.fct_orders.len(),
            self.fct_order_items.len(),
        ]
    }
}
