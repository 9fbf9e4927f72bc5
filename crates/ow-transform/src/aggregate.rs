//! Per-order aggregation of line items and the join onto orders.

use std::collections::{BTreeMap, HashMap};

use ow_model::{FctOrder, FctOrderItem, OrderAggregate};

use crate::orders::ValidOrder;

/// Sum `line_total` and count items per `order_id`.
///
/// Single pass over `items`; sums accumulate in input order. The result is
/// sorted by `order_id`. Items whose order was filtered out still aggregate;
/// the join simply never looks them up.
pub fn aggregate_items(items: &[FctOrderItem]) -> Vec<OrderAggregate> {
    let mut totals: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for item in items {
        let entry = totals.entry(item.order_id.as_str()).or_insert((0.0, 0));
        entry.0 += item.line_total;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(order_id, (order_total, item_count))| OrderAggregate {
            order_id: order_id.to_string(),
            order_total,
            item_count,
        })
        .collect()
}

/// Left-join aggregates onto the filtered orders.
///
/// Every order appears exactly once, in its original position. Orders with
/// no surviving items get `order_total = 0.0` and `item_count = 0`.
pub fn join_order_totals(orders: &[ValidOrder], aggregates: &[OrderAggregate]) -> Vec<FctOrder> {
    let by_order: HashMap<&str, &OrderAggregate> = aggregates
        .iter()
        .map(|agg| (agg.order_id.as_str(), agg))
        .collect();

    orders
        .iter()
        .map(|order| {
            let (order_total, item_count) = by_order
                .get(order.order_id.as_str())
                .map_or((0.0, 0), |agg| (agg.order_total, agg.item_count));
            FctOrder {
                order_id: order.order_id.clone(),
                customer_id: order.customer_id,
                order_date: order.order_date,
                order_total,
                item_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(order_id: &str, line_total: f64) -> FctOrderItem {
        FctOrderItem {
            order_id: order_id.to_string(),
            product_sku: "SKU".to_string(),
            quantity: 1.0,
            unit_price: line_total,
            line_total,
        }
    }

    fn order(order_id: &str) -> ValidOrder {
        ValidOrder {
            order_id: order_id.to_string(),
            customer_id: 1,
            order_date: None,
        }
    }

    #[test]
    fn test_sums_and_counts_per_order() {
        let aggregates = aggregate_items(&[item("10", 10.0), item("11", 4.0), item("10", 5.0)]);
        assert_eq!(
            aggregates,
            vec![
                OrderAggregate {
                    order_id: "10".to_string(),
                    order_total: 15.0,
                    item_count: 2,
                },
                OrderAggregate {
                    order_id: "11".to_string(),
                    order_total: 4.0,
                    item_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_missing_aggregate_defaults_to_zero() {
        let aggregates = aggregate_items(&[item("10", 10.0)]);
        let facts = join_order_totals(&[order("10"), order("20")], &aggregates);
        assert_eq!(facts.len(), 2);
        assert_eq!((facts[0].order_total, facts[0].item_count), (10.0, 1));
        assert_eq!((facts[1].order_total, facts[1].item_count), (0.0, 0));
    }

    #[test]
    fn test_join_follows_order_table() {
        let aggregates = aggregate_items(&[item("a", 1.0), item("b", 2.0), item("orphan", 9.0)]);
        let facts = join_order_totals(&[order("b"), order("a")], &aggregates);
        let ids: Vec<&str> = facts.iter().map(|f| f.order_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(facts[0].order_total, 2.0);
    }

    #[test]
    fn test_repeated_order_rows_each_get_totals() {
        let aggregates = aggregate_items(&[item("10", 3.0)]);
        let facts = join_order_totals(&[order("10"), order("10")], &aggregates);
        assert_eq!(facts.len(), 2);
        assert!(facts.iter().all(|f| f.order_total == 3.0 && f.item_count == 1));
    }
}
