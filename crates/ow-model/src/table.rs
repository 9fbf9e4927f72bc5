//! Table identities and column schemas.

use std::fmt;

/// One of the three raw extracts consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RawTable {
    Customers,
    Orders,
    OrderItems,
}

impl RawTable {
    pub const ALL: [RawTable; 3] = [RawTable::Customers, RawTable::Orders, RawTable::OrderItems];

    /// Logical table name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            RawTable::Customers => "customers",
            RawTable::Orders => "orders",
            RawTable::OrderItems => "order_items",
        }
    }

    /// Default file name inside the raw directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            RawTable::Customers => "customers.csv",
            RawTable::Orders => "orders.csv",
            RawTable::OrderItems => "order_items.csv",
        }
    }

    /// Columns that must be present in the extract. Extra columns are ignored.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            RawTable::Customers => &["customer_id", "email", "full_name", "updated_at"],
            RawTable::Orders => &["order_id", "customer_id", "order_date"],
            RawTable::OrderItems => &["order_id", "product_sku", "quantity", "unit_price"],
        }
    }
}

impl fmt::Display for RawTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three processed tables emitted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessedTable {
    DimCustomers,
    FctOrders,
    FctOrderItems,
}

impl ProcessedTable {
    pub const ALL: [ProcessedTable; 3] = [
        ProcessedTable::DimCustomers,
        ProcessedTable::FctOrders,
        ProcessedTable::FctOrderItems,
    ];

    /// Destination table name (also the stem of the processed CSV file).
    pub fn name(self) -> &'static str {
        match self {
            ProcessedTable::DimCustomers => "dim_customers",
            ProcessedTable::FctOrders => "fct_orders",
            ProcessedTable::FctOrderItems => "fct_order_items",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }

    /// Output columns in emission order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ProcessedTable::DimCustomers => &["customer_id", "email", "full_name", "updated_at"],
            ProcessedTable::FctOrders => &[
                "order_id",
                "customer_id",
                "order_date",
                "order_total",
                "item_count",
            ],
            ProcessedTable::FctOrderItems => &[
                "order_id",
                "product_sku",
                "quantity",
                "unit_price",
                "line_total",
            ],
        }
    }
}

impl fmt::Display for ProcessedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
