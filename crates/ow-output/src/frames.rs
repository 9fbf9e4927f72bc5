//! Typed DataFrames for the processed tables.

use chrono::NaiveDateTime;
use ow_model::{DimCustomer, FctOrder, FctOrderItem, ProcessedTable, ProcessedTables};
use ow_transform::{format_timestamp, is_midnight};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::Result;

/// Render a timestamp column.
///
/// When every present value is at midnight the column is written as bare
/// dates, otherwise as full timestamps. Absent values stay null.
pub fn timestamp_column(values: &[Option<NaiveDateTime>]) -> Vec<Option<String>> {
    let date_only = values.iter().flatten().all(is_midnight);
    values
        .iter()
        .map(|value| value.as_ref().map(|ts| format_timestamp(ts, date_only)))
        .collect()
}

/// `dim_customers`: customer_id (Int64, nullable), email, full_name, updated_at.
pub fn dim_customers_frame(rows: &[DimCustomer]) -> Result<DataFrame> {
    let customer_id: Vec<Option<i64>> = rows.iter().map(|r| r.customer_id).collect();
    let email: Vec<&str> = rows.iter().map(|r| r.email.as_str()).collect();
    let full_name: Vec<&str> = rows.iter().map(|r| r.full_name.as_str()).collect();
    let updated_at: Vec<Option<NaiveDateTime>> = rows.iter().map(|r| r.updated_at).collect();

    let columns: Vec<Column> = vec![
        Series::new("customer_id".into(), customer_id).into(),
        Series::new("email".into(), email).into(),
        Series::new("full_name".into(), full_name).into(),
        Series::new("updated_at".into(), timestamp_column(&updated_at)).into(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// `fct_orders`: order_id, customer_id, order_date, order_total, item_count.
pub fn fct_orders_frame(rows: &[FctOrder]) -> Result<DataFrame> {
    let order_id: Vec<&str> = rows.iter().map(|r| r.order_id.as_str()).collect();
    let customer_id: Vec<i64> = rows.iter().map(|r| r.customer_id).collect();
    let order_date: Vec<Option<NaiveDateTime>> = rows.iter().map(|r| r.order_date).collect();
    let order_total: Vec<f64> = rows.iter().map(|r| r.order_total).collect();
    let item_count: Vec<i64> = rows.iter().map(|r| r.item_count).collect();

    let columns: Vec<Column> = vec![
        Series::new("order_id".into(), order_id).into(),
        Series::new("customer_id".into(), customer_id).into(),
        Series::new("order_date".into(), timestamp_column(&order_date)).into(),
        Series::new("order_total".into(), order_total).into(),
        Series::new("item_count".into(), item_count).into(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// `fct_order_items`: order_id, product_sku, quantity, unit_price, line_total.
pub fn fct_order_items_frame(rows: &[FctOrderItem]) -> Result<DataFrame> {
    let order_id: Vec<&str> = rows.iter().map(|r| r.order_id.as_str()).collect();
    let product_sku: Vec<&str> = rows.iter().map(|r| r.product_sku.as_str()).collect();
    let quantity: Vec<f64> = rows.iter().map(|r| r.quantity).collect();
    let unit_price: Vec<f64> = rows.iter().map(|r| r.unit_price).collect();
    let line_total: Vec<f64> = rows.iter().map(|r| r.line_total).collect();

    let columns: Vec<Column> = vec![
        Series::new("order_id".into(), order_id).into(),
        Series::new("product_sku".into(), product_sku).into(),
        Series::new("quantity".into(), quantity).into(),
        Series::new("unit_price".into(), unit_price).into(),
        Series::new("line_total".into(), line_total).into(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Frame for one processed table.
pub fn table_frame(tables: &ProcessedTables, table: ProcessedTable) -> Result<DataFrame> {
    match table {
        ProcessedTable::DimCustomers => dim_customers_frame(&tables.dim_customers),
        ProcessedTable::FctOrders => fct_orders_frame(&tables.fct_orders),
        ProcessedTable::FctOrderItems => fct_order_items_frame(&tables.fct_order_items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::{AnyValue, DataType};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_timestamp_column_date_only_when_all_midnight() {
        let rendered = timestamp_column(&[Some(at(2024, 1, 1, 0)), None]);
        assert_eq!(rendered, vec![Some("2024-01-01".to_string()), None]);
    }

    #[test]
    fn test_timestamp_column_full_when_any_has_time() {
        let rendered = timestamp_column(&[Some(at(2024, 1, 1, 0)), Some(at(2024, 1, 2, 13))]);
        assert_eq!(
            rendered,
            vec![
                Some("2024-01-01 00:00:00".to_string()),
                Some("2024-01-02 13:00:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_frames_follow_output_schema() {
        let tables = ProcessedTables {
            dim_customers: vec![DimCustomer {
                customer_id: Some(1),
                email: "a@x.com".to_string(),
                full_name: "Bob".to_string(),
                updated_at: None,
            }],
            fct_orders: vec![FctOrder {
                order_id: "10".to_string(),
                customer_id: 1,
                order_date: Some(at(2024, 3, 5, 0)),
                order_total: 10.0,
                item_count: 1,
            }],
            fct_order_items: Vec::new(),
        };
        for table in ProcessedTable::ALL {
            let df = table_frame(&tables, table).unwrap();
            let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
            assert_eq!(names, table.columns());
        }

        let orders = fct_orders_frame(&tables.fct_orders).unwrap();
        assert_eq!(orders.column("customer_id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(orders.column("order_total").unwrap().dtype(), &DataType::Float64);
        assert_eq!(
            orders.column("order_date").unwrap().get(0).unwrap(),
            AnyValue::String("2024-03-05")
        );
    }
}
