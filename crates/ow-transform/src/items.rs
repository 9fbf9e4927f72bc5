//! Line item sanitization.

use ow_common::{normalize_key, parse_f64};
use ow_model::{FctOrderItem, RawOrderItem};

/// Smallest accepted quantity.
pub const MIN_QUANTITY: f64 = 1.0;

/// Keep line items with `quantity >= 1` and `unit_price > 0` and derive
/// `line_total = quantity * unit_price`.
///
/// An unparsable quantity or price fails the check, so the row is dropped.
/// Order ids are normalized the same way as in [`crate::filter_orders`].
/// Input order is preserved.
pub fn sanitize_items(raw: &[RawOrderItem]) -> Vec<FctOrderItem> {
    raw.iter()
        .filter_map(|item| {
            let quantity = parse_f64(&item.quantity).filter(|q| *q >= MIN_QUANTITY)?;
            let unit_price = parse_f64(&item.unit_price).filter(|p| *p > 0.0)?;
            Some(FctOrderItem {
                order_id: normalize_key(&item.order_id),
                product_sku: item.product_sku.clone(),
                quantity,
                unit_price,
                line_total: quantity * unit_price,
            })
        })
        .collect()
}
