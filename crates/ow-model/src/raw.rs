//! Raw extract records.
//!
//! Cells are kept as the text found in the extract. Type coercion is a
//! pipeline concern so that an unparsable value never fails ingestion.

/// One row of the customers extract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCustomer {
    pub customer_id: String,
    pub email: String,
    pub full_name: String,
    pub updated_at: String,
}

/// One row of the orders extract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOrder {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: String,
}

/// One row of the order items extract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOrderItem {
    pub order_id: String,
    pub product_sku: String,
    pub quantity: String,
    pub unit_price: String,
}

/// The three raw extracts, fully materialised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTables {
    pub customers: Vec<RawCustomer>,
    pub orders: Vec<RawOrder>,
    pub items: Vec<RawOrderItem>,
}

impl RawCustomer {
    pub fn new(
        customer_id: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        updated_at: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            email: email.into(),
            full_name: full_name.into(),
            updated_at: updated_at.into(),
        }
    }
}

impl RawOrder {
    pub fn new(
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
        order_date: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            order_date: order_date.into(),
        }
    }
}

impl RawOrderItem {
    pub fn new(
        order_id: impl Into<String>,
        product_sku: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_sku: product_sku.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }
}
