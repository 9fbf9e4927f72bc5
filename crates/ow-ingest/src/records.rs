//! Conversion of raw extract frames into records.

use std::path::Path;
use std::time::Instant;

use ow_common::any_to_string;
use ow_model::{RawCustomer, RawOrder, RawOrderItem, RawTable, RawTables};
use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::{debug, info};

use crate::csv::{CsvHeaders, read_csv_table};
use crate::discovery::RawSources;
use crate::error::{IngestError, Result};

/// Required columns of one extract, resolved to DataFrame columns in
/// `RawTable::required_columns` order.
struct RequiredColumns<'a> {
    columns: Vec<&'a Column>,
}

impl<'a> RequiredColumns<'a> {
    fn resolve(
        df: &'a DataFrame,
        headers: &CsvHeaders,
        table: RawTable,
        path: &Path,
    ) -> Result<Self> {
        if let Some(column) = headers.first_missing(table.required_columns()) {
            return Err(IngestError::MissingColumn {
                table,
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
        let frame_columns = df.get_columns();
        let mut columns = Vec::with_capacity(table.required_columns().len());
        for name in table.required_columns() {
            let column = headers
                .position(name)
                .and_then(|idx| frame_columns.get(idx))
                .ok_or_else(|| IngestError::MissingColumn {
                    table,
                    column: (*name).to_string(),
                    path: path.to_path_buf(),
                })?;
            columns.push(column);
        }
        Ok(Self { columns })
    }

    /// Raw text of a cell; nulls read as empty text.
    fn text(&self, column: usize, row: usize) -> String {
        let value = self.columns[column].get(row).unwrap_or(AnyValue::Null);
        any_to_string(value)
    }

    /// Identifier cell: surrounding whitespace is not part of a key.
    fn key(&self, column: usize, row: usize) -> String {
        self.text(column, row).trim().to_string()
    }
}

/// Extract customer records from a customers frame.
pub fn customers_from_frame(
    df: &DataFrame,
    headers: &CsvHeaders,
    path: &Path,
) -> Result<Vec<RawCustomer>> {
    let cols = RequiredColumns::resolve(df, headers, RawTable::Customers, path)?;
    Ok((0..df.height())
        .map(|row| RawCustomer {
            customer_id: cols.key(0, row),
            email: cols.text(1, row),
            full_name: cols.text(2, row),
            updated_at: cols.text(3, row),
        })
        .collect())
}

/// Extract order records from an orders frame.
pub fn orders_from_frame(
    df: &DataFrame,
    headers: &CsvHeaders,
    path: &Path,
) -> Result<Vec<RawOrder>> {
    let cols = RequiredColumns::resolve(df, headers, RawTable::Orders, path)?;
    Ok((0..df.height())
        .map(|row| RawOrder {
            order_id: cols.key(0, row),
            customer_id: cols.key(1, row),
            order_date: cols.text(2, row),
        })
        .collect())
}

/// Extract line item records from an order items frame.
pub fn items_from_frame(
    df: &DataFrame,
    headers: &CsvHeaders,
    path: &Path,
) -> Result<Vec<RawOrderItem>> {
    let cols = RequiredColumns::resolve(df, headers, RawTable::OrderItems, path)?;
    Ok((0..df.height())
        .map(|row| RawOrderItem {
            order_id: cols.key(0, row),
            product_sku: cols.key(1, row),
            quantity: cols.text(2, row),
            unit_price: cols.text(3, row),
        })
        .collect())
}

/// Load all three raw extracts.
///
/// Every extract is checked for existence before any is read, so a missing
/// file is reported without parsing the others.
pub fn load_raw_tables(sources: &RawSources) -> Result<RawTables> {
    let start = Instant::now();
    sources.verify()?;

    let customers = load_table(sources, RawTable::Customers, customers_from_frame)?;
    let orders = load_table(sources, RawTable::Orders, orders_from_frame)?;
    let items = load_table(sources, RawTable::OrderItems, items_from_frame)?;

    info!(
        raw_dir = %sources.dir().display(),
        customers = customers.len(),
        orders = orders.len(),
        order_items = items.len(),
        duration_ms = start.elapsed().as_millis(),
        "raw extracts loaded"
    );

    Ok(RawTables {
        customers,
        orders,
        items,
    })
}

fn load_table<T>(
    sources: &RawSources,
    table: RawTable,
    extract: fn(&DataFrame, &CsvHeaders, &Path) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let path = sources.path(table);
    let (df, headers) = read_csv_table(&path)?;
    let records = extract(&df, &headers, &path)?;
    debug!(
        table = %table,
        path = %path.display(),
        rows = records.len(),
        columns = headers.len(),
        "extract read"
    );
    Ok(records)
}
