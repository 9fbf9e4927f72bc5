//! Connection and full-refresh load.

use std::time::{Duration, Instant};

use ow_model::{DimCustomer, FctOrder, FctOrderItem, ProcessedTable, ProcessedTables};
use sqlx::postgres::PgPoolOptions;
use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::PgConfig;
use crate::error::{LoadError, Result};
use crate::sql::{
    create_schema_sql, create_table_sql, drop_table_sql, insert_prefix, rows_per_insert,
    validate_identifier,
};

/// A record that can be inserted into its destination table.
pub trait SinkRow {
    const TABLE: ProcessedTable;

    /// Bind one value per output column, in column order.
    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

impl SinkRow for DimCustomer {
    const TABLE: ProcessedTable = ProcessedTable::DimCustomers;

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.customer_id)
            .push_bind(self.email.clone())
            .push_bind(self.full_name.clone())
            .push_bind(self.updated_at);
    }
}

impl SinkRow for FctOrder {
    const TABLE: ProcessedTable = ProcessedTable::FctOrders;

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.order_id.clone())
            .push_bind(self.customer_id)
            .push_bind(self.order_date)
            .push_bind(self.order_total)
            .push_bind(self.item_count);
    }
}

impl SinkRow for FctOrderItem {
    const TABLE: ProcessedTable = ProcessedTable::FctOrderItems;

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.order_id.clone())
            .push_bind(self.product_sku.clone())
            .push_bind(self.quantity)
            .push_bind(self.unit_price)
            .push_bind(self.line_total);
    }
}

/// Rows written to one destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: ProcessedTable,
    pub rows: u64,
}

/// Outcome of a committed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub schema: String,
    pub tables: Vec<LoadedTable>,
}

/// Delay before retry number `attempt` (1-based): linear in the attempt.
pub fn retry_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(attempt)
}

/// Open a pool, retrying with linear backoff.
///
/// Makes `1 + connect_retries` attempts in total.
pub async fn connect(config: &PgConfig) -> Result<PgPool> {
    config.validate()?;
    let attempts = config.connect_retries.saturating_add(1);
    let target = config.target();

    let mut attempt = 1;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await;
        match result {
            Ok(pool) => {
                info!(target = %target, attempt, "connected to postgres");
                return Ok(pool);
            }
            Err(err) if attempt < attempts => {
                let delay = retry_delay(config.retry_backoff, attempt);
                warn!(
                    target = %target,
                    attempt,
                    error = %err,
                    delay_ms = delay.as_millis(),
                    "postgres connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                return Err(LoadError::Connect {
                    target,
                    attempts,
                    source: err,
                });
            }
        }
    }
}

async fn replace_table<R: SinkRow>(
    tx: &mut Transaction<'_, Postgres>,
    schema: &str,
    rows: &[R],
) -> Result<LoadedTable> {
    let table = R::TABLE;
    let table_err = |operation: &'static str| {
        move |source: sqlx::Error| LoadError::Table {
            operation,
            table,
            source,
        }
    };

    sqlx::query(&drop_table_sql(schema, table))
        .execute(&mut **tx)
        .await
        .map_err(table_err("drop"))?;
    sqlx::query(&create_table_sql(schema, table))
        .execute(&mut **tx)
        .await
        .map_err(table_err("create"))?;

    let mut inserted = 0u64;
    for batch in rows.chunks(rows_per_insert(table)) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(insert_prefix(schema, table));
        builder.push_values(batch, |mut row, record| record.push_binds(&mut row));
        let result = builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(table_err("insert into"))?;
        inserted += result.rows_affected();
    }

    debug!(table = %table, rows = inserted, "table replaced");
    Ok(LoadedTable {
        table,
        rows: inserted,
    })
}

/// Replace the three destination tables in `schema` with `tables`.
///
/// Runs in one transaction: any failure rolls back and leaves the previous
/// contents in place.
pub async fn load_tables(
    pool: &PgPool,
    schema: &str,
    tables: &ProcessedTables,
) -> Result<LoadReport> {
    validate_identifier(schema)?;
    let span = info_span!("load", schema = %schema);
    async {
        let start = Instant::now();
        let mut tx = pool.begin().await?;

        sqlx::query(&create_schema_sql(schema))
            .execute(&mut *tx)
            .await?;

        let loaded = vec![
            replace_table(&mut tx, schema, &tables.dim_customers).await?,
            replace_table(&mut tx, schema, &tables.fct_orders).await?,
            replace_table(&mut tx, schema, &tables.fct_order_items).await?,
        ];

        tx.commit().await?;
        info!(
            tables = loaded.len(),
            rows = loaded.iter().map(|t| t.rows).sum::<u64>(),
            duration_ms = start.elapsed().as_millis(),
            "load committed"
        );
        Ok::<_, LoadError>(LoadReport {
            schema: schema.to_string(),
            tables: loaded,
        })
    }
    .instrument(span)
    .await
}
