use std::time::Instant;

use ow_model::{ProcessedTables, RawTables};
use tracing::{debug, info, info_span};

use crate::aggregate::{aggregate_items, join_order_totals};
use crate::customers::dedup_customers;
use crate::items::sanitize_items;
use crate::orders::{filter_orders, valid_customer_ids};

/// Run the full transform over the three raw tables.
///
/// Customers are deduplicated first because the order filter needs the final
/// set of customer keys. Items are sanitized independently of orders, then
/// aggregated and left-joined onto the surviving orders.
pub fn run_pipeline(raw: &RawTables) -> ProcessedTables {
    let span = info_span!(
        "transform",
        customers_in = raw.customers.len(),
        orders_in = raw.orders.len(),
        items_in = raw.items.len()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let dim_customers = info_span!("dedup_customers").in_scope(|| {
        let dimension = dedup_customers(&raw.customers);
        debug!(
            input_rows = raw.customers.len(),
            output_rows = dimension.len(),
            "customer dedup complete"
        );
        dimension
    });

    let valid_orders = info_span!("filter_orders").in_scope(|| {
        let valid_ids = valid_customer_ids(&dim_customers);
        let kept = filter_orders(&raw.orders, &valid_ids);
        debug!(
            input_rows = raw.orders.len(),
            output_rows = kept.len(),
            valid_customers = valid_ids.len(),
            "referential filter complete"
        );
        kept
    });

    let fct_order_items = info_span!("sanitize_items").in_scope(|| {
        let kept = sanitize_items(&raw.items);
        debug!(
            input_rows = raw.items.len(),
            output_rows = kept.len(),
            "item sanity filter complete"
        );
        kept
    });

    let fct_orders = info_span!("aggregate").in_scope(|| {
        let aggregates = aggregate_items(&fct_order_items);
        let joined = join_order_totals(&valid_orders, &aggregates);
        debug!(
            aggregated_orders = aggregates.len(),
            output_rows = joined.len(),
            "order aggregation complete"
        );
        joined
    });

    let tables = ProcessedTables {
        dim_customers,
        fct_orders,
        fct_order_items,
    };
    let [customers_out, orders_out, items_out] = tables.row_counts();
    info!(
        customers_out,
        orders_out,
        items_out,
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    tables
}
