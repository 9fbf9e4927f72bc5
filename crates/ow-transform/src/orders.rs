//! Order cleaning and the referential-integrity filter.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use ow_common::{normalize_key, parse_i64};
use ow_model::{DimCustomer, RawOrder};

use crate::datetime::parse_timestamp;

/// An order whose customer exists in the dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrder {
    pub order_id: String,
    pub customer_id: i64,
    pub order_date: Option<NaiveDateTime>,
}

/// Customer ids a fact row may reference. Absent ids are never valid.
pub fn valid_customer_ids(dimension: &[DimCustomer]) -> HashSet<i64> {
    dimension.iter().filter_map(|c| c.customer_id).collect()
}

/// Keep the orders whose parsed `customer_id` is a valid dimension key.
///
/// Orders with an unparsable or unknown customer are dropped without error.
/// An unparsable `order_date` does not drop the order; it becomes absent.
/// Integral order ids are normalized (`10.0` becomes `10`).
/// Input order is preserved.
pub fn filter_orders(raw: &[RawOrder], valid_ids: &HashSet<i64>) -> Vec<ValidOrder> {
    raw.iter()
        .filter_map(|order| {
            let customer_id = parse_i64(&order.customer_id)?;
            if !valid_ids.contains(&customer_id) {
                return None;
            }
            Some(ValidOrder {
                order_id: normalize_key(&order.order_id),
                customer_id,
                order_date: parse_timestamp(&order.order_date),
            })
        })
        .collect()
}
