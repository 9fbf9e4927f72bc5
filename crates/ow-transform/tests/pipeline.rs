//! End-to-end behaviour of the transform engine.

use std::collections::HashSet;

use ow_common::parse_i64;
use ow_model::{ProcessedTables, RawCustomer, RawOrder, RawOrderItem, RawTables};
use ow_transform::run_pipeline;
use proptest::prelude::*;

fn scenario() -> RawTables {
    RawTables {
        customers: vec![
            RawCustomer::new("1", "A@X.com", " Bob ", "2024-01-01"),
            RawCustomer::new("1", "a@x.com", "Bob", "2024-03-01"),
        ],
        orders: vec![
            RawOrder::new("10", "1", "2024-03-05"),
            RawOrder::new("11", "2", "2024-03-06"),
        ],
        items: vec![
            RawOrderItem::new("10", "SKU1", "2", "5.0"),
            RawOrderItem::new("10", "SKU2", "0", "3.0"),
        ],
    }
}

fn render(tables: &ProcessedTables) -> String {
    let mut out = String::new();
    out.push_str("dim_customers\n");
    for c in &tables.dim_customers {
        out.push_str(&format!(
            "  {:?} {} {} {:?}\n",
            c.customer_id, c.email, c.full_name, c.updated_at
        ));
    }
    out.push_str("fct_orders\n");
    for o in &tables.fct_orders {
        out.push_str(&format!(
            "  {} {} {:?} {:.2} {}\n",
            o.order_id, o.customer_id, o.order_date, o.order_total, o.item_count
        ));
    }
    out.push_str("fct_order_items\n");
    for i in &tables.fct_order_items {
        out.push_str(&format!(
            "  {} {} {:.2} {:.2} {:.2}\n",
            i.order_id, i.product_sku, i.quantity, i.unit_price, i.line_total
        ));
    }
    out
}

#[test]
fn end_to_end_scenario() {
    let tables = run_pipeline(&scenario());

    assert_eq!(tables.dim_customers.len(), 1);
    assert_eq!(tables.dim_customers[0].customer_id, Some(1));
    assert_eq!(tables.dim_customers[0].email, "a@x.com");

    assert_eq!(tables.fct_orders.len(), 1);
    assert_eq!(tables.fct_orders[0].order_id, "10");
    assert_eq!(tables.fct_orders[0].order_total, 10.0);
    assert_eq!(tables.fct_orders[0].item_count, 1);

    assert_eq!(tables.fct_order_items.len(), 1);
    assert_eq!(tables.fct_order_items[0].product_sku, "SKU1");
}

#[test]
fn end_to_end_snapshot() {
    insta::assert_snapshot!(render(&run_pipeline(&scenario())), @r"
    dim_customers
      Some(1) a@x.com Bob Some(2024-03-01T00:00:00)
    fct_orders
      10 1 Some(2024-03-05T00:00:00) 10.00 1
    fct_order_items
      10 SKU1 2.00 5.00 10.00
    ");
}

#[test]
fn order_totals_sum_surviving_items() {
    let raw = RawTables {
        customers: vec![RawCustomer::new("1", "a@x.com", "A", "2024-01-01")],
        orders: vec![
            RawOrder::new("10", "1", "2024-01-02"),
            RawOrder::new("20", "1", "2024-01-03"),
        ],
        items: vec![
            RawOrderItem::new("10", "A", "1", "10"),
            RawOrderItem::new("10", "B", "1", "5"),
            RawOrderItem::new("20", "C", "1", "-5"),
        ],
    };
    let tables = run_pipeline(&raw);
    let totals: Vec<(f64, i64)> = tables
        .fct_orders
        .iter()
        .map(|o| (o.order_total, o.item_count))
        .collect();
    assert_eq!(totals, vec![(15.0, 2), (0.0, 0)]);
}

#[test]
fn float_spelled_item_order_ids_join_their_order() {
    let raw = RawTables {
        customers: vec![RawCustomer::new("1", "a@x.com", "A", "2024-01-01")],
        orders: vec![RawOrder::new("10", "1", "2024-01-02")],
        items: vec![
            RawOrderItem::new("10.0", "A", "2", "3"),
            RawOrderItem::new(" 10 ", "B", "1", "4"),
        ],
    };
    let tables = run_pipeline(&raw);
    assert_eq!(tables.fct_orders[0].order_total, 10.0);
    assert_eq!(tables.fct_orders[0].item_count, 2);
    assert!(tables.fct_order_items.iter().all(|i| i.order_id == "10"));
}

#[test]
fn empty_input_yields_empty_tables() {
    let tables = run_pipeline(&RawTables::default());
    assert_eq!(tables.row_counts(), [0, 0, 0]);
}

fn arb_customer() -> impl Strategy<Value = RawCustomer> {
    (
        prop_oneof![4 => (0i64..8).prop_map(|id| id.to_string()), 1 => Just("x".to_string())],
        "[a-z]{1,4}@x\\.com",
        prop_oneof![
            3 => (1u32..28).prop_map(|d| format!("2024-01-{d:02}")),
            1 => Just(String::new()),
        ],
    )
        .prop_map(|(id, email, ts)| RawCustomer::new(id, email, "Name", ts))
}

fn arb_order() -> impl Strategy<Value = RawOrder> {
    ((0i64..20), prop_oneof![(0i64..12).prop_map(|id| id.to_string()), Just(String::new())])
        .prop_map(|(order_id, customer_id)| RawOrder::new(order_id.to_string(), customer_id, "2024-02-01"))
}

fn arb_item() -> impl Strategy<Value = RawOrderItem> {
    ((0i64..20), (-2i64..5), (-3i64..50)).prop_map(|(order_id, qty, price)| {
        RawOrderItem::new(order_id.to_string(), "SKU", qty.to_string(), price.to_string())
    })
}

fn arb_tables() -> impl Strategy<Value = RawTables> {
    (
        prop::collection::vec(arb_customer(), 0..30),
        prop::collection::vec(arb_order(), 0..30),
        prop::collection::vec(arb_item(), 0..40),
    )
        .prop_map(|(customers, orders, items)| RawTables {
            customers,
            orders,
            items,
        })
}

proptest! {
    #[test]
    fn one_dimension_row_per_distinct_id(raw in arb_tables()) {
        let tables = run_pipeline(&raw);
        let distinct: HashSet<Option<i64>> = raw
            .customers
            .iter()
            .map(|c| parse_i64(&c.customer_id))
            .collect();
        prop_assert_eq!(tables.dim_customers.len(), distinct.len());
        let emitted: HashSet<Option<i64>> =
            tables.dim_customers.iter().map(|c| c.customer_id).collect();
        prop_assert_eq!(emitted, distinct);
    }

    #[test]
    fn facts_respect_integrity_and_sanity(raw in arb_tables()) {
        let tables = run_pipeline(&raw);
        let valid: HashSet<i64> = tables
            .dim_customers
            .iter()
            .filter_map(|c| c.customer_id)
            .collect();
        prop_assert!(tables.fct_orders.iter().all(|o| valid.contains(&o.customer_id)));
        prop_assert!(tables
            .fct_order_items
            .iter()
            .all(|i| i.quantity >= 1.0 && i.unit_price > 0.0));
        for order in &tables.fct_orders {
            let count = tables
                .fct_order_items
                .iter()
                .filter(|i| i.order_id == order.order_id)
                .count();
            prop_assert_eq!(order.item_count, count as i64);
        }
    }

    #[test]
    fn runs_are_idempotent(raw in arb_tables()) {
        prop_assert_eq!(run_pipeline(&raw), run_pipeline(&raw));
    }
}
