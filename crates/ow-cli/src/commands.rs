//! Command implementations shared by the binary and the integration tests.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ow_ingest::{RawSources, load_raw_tables};
use ow_load::{LoadReport, PgConfig, connect, load_tables};
use ow_model::{DimCustomer, ProcessedTables};
use ow_output::{read_processed, write_processed};
use ow_transform::run_pipeline;
use tracing::{info, info_span, trace};

use crate::logging::redact_value;
use crate::types::{CommandReport, LoadSummary, OutputFile, RunSummary};

/// Inputs of a transform.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub sources: RawSources,
    pub processed_dir: PathBuf,
    pub dry_run: bool,
}

/// Result of a transform: the report plus the in-memory tables.
#[derive(Debug)]
pub struct TransformOutcome {
    pub report: CommandReport,
    pub tables: ProcessedTables,
}

/// Trace every dimension row. Emails and names stay redacted unless
/// `--log-data` was given.
fn log_dimension_rows(customers: &[DimCustomer]) {
    for customer in customers {
        trace!(
            customer_id = ?customer.customer_id,
            email = %redact_value(&customer.email),
            full_name = %redact_value(&customer.full_name),
            "dimension row"
        );
    }
}

/// Read the raw extracts, run the engine and (unless dry-run or `write` is
/// false) write the processed tables.
fn transform(request: &TransformRequest, write: bool) -> Result<TransformOutcome> {
    let span = info_span!("transform_command", raw_dir = %request.sources.dir().display());
    let _guard = span.enter();
    let start = Instant::now();

    let raw = load_raw_tables(&request.sources).context("ingest raw extracts")?;
    let tables = run_pipeline(&raw);
    let summary = RunSummary::from_tables(&raw, &tables);
    info!(
        customers_in = summary.customers_in,
        customers_out = summary.customers_out,
        orders_in = summary.orders_in,
        orders_out = summary.orders_out,
        items_in = summary.items_in,
        items_out = summary.items_out,
        orders_without_items = summary.orders_without_items,
        "run summary"
    );
    log_dimension_rows(&tables.dim_customers);
    for order in tables.fct_orders.iter().filter(|o| o.item_count == 0) {
        trace!(order_id = %redact_value(&order.order_id), "order has no surviving items");
    }

    let outputs = if write && !request.dry_run {
        write_processed(&request.processed_dir, &tables)
            .with_context(|| format!("write {}", request.processed_dir.display()))?
            .iter()
            .map(OutputFile::from)
            .collect()
    } else {
        Vec::new()
    };

    info!(duration_ms = start.elapsed().as_millis(), "transform finished");
    Ok(TransformOutcome {
        report: CommandReport {
            summary: Some(summary),
            outputs,
            load: None,
            dry_run: request.dry_run,
        },
        tables,
    })
}

/// `ow transform`.
pub fn run_transform(request: &TransformRequest) -> Result<TransformOutcome> {
    transform(request, true)
}

/// `ow load`: read the processed directory and replace the destination tables.
pub fn run_load(processed_dir: &Path, config: &PgConfig) -> Result<CommandReport> {
    let tables = read_processed(processed_dir)
        .with_context(|| format!("read processed tables from {}", processed_dir.display()))?;
    let report = load(&tables, config)?;
    Ok(CommandReport {
        summary: None,
        outputs: Vec::new(),
        load: Some(LoadSummary::from(&report)),
        dry_run: false,
    })
}

/// `ow run`: transform, optionally write, then load from memory.
pub fn run_all(request: &TransformRequest, no_write: bool, config: &PgConfig) -> Result<CommandReport> {
    let TransformOutcome { mut report, tables } = transform(request, !no_write)?;
    if request.dry_run {
        return Ok(report);
    }
    let loaded = load(&tables, config)?;
    report.load = Some(LoadSummary::from(&loaded));
    Ok(report)
}

fn load(tables: &ProcessedTables, config: &PgConfig) -> Result<LoadReport> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(async {
        let pool = connect(config)
            .await
            .with_context(|| format!("connect to {}", config.target()))?;
        let report = load_tables(&pool, &config.schema, tables)
            .await
            .with_context(|| format!("load into schema {}", config.schema))?;
        pool.close().await;
        Ok::<_, anyhow::Error>(report)
    })
}
