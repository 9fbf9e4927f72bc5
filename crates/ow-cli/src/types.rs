use std::path::PathBuf;

use ow_load::LoadReport;
use ow_model::{ProcessedTables, RawTables};
use ow_output::WrittenTable;
use serde::Serialize;

/// Row counts of one run, computed from the table sizes on either side of
/// the transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub customers_in: usize,
    pub customers_out: usize,
    pub orders_in: usize,
    pub orders_out: usize,
    pub items_in: usize,
    pub items_out: usize,
    pub orders_without_items: usize,
}

impl RunSummary {
    pub fn from_tables(raw: &RawTables, processed: &ProcessedTables) -> Self {
        Self {
            customers_in: raw.customers.len(),
            customers_out: processed.dim_customers.len(),
            orders_in: raw.orders.len(),
            orders_out: processed.fct_orders.len(),
            items_in: raw.items.len(),
            items_out: processed.fct_order_items.len(),
            orders_without_items: processed
                .fct_orders
                .iter()
                .filter(|o| o.item_count == 0)
                .count(),
        }
    }

    /// Customer rows collapsed into an earlier or later duplicate.
    pub fn customers_collapsed(&self) -> usize {
        self.customers_in.saturating_sub(self.customers_out)
    }

    /// Orders dropped for an unknown or unparsable customer.
    pub fn orders_dropped(&self) -> usize {
        self.orders_in.saturating_sub(self.orders_out)
    }

    /// Line items dropped by the quantity/price rules.
    pub fn items_dropped(&self) -> usize {
        self.items_in.saturating_sub(self.items_out)
    }
}

/// A processed file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub table: String,
    pub path: PathBuf,
    pub rows: usize,
    pub sha256: String,
}

impl From<&WrittenTable> for OutputFile {
    fn from(written: &WrittenTable) -> Self {
        Self {
            table: written.table.name().to_string(),
            path: written.path.clone(),
            rows: written.rows,
            sha256: written.sha256.clone(),
        }
    }
}

/// Rows loaded into one destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedTableSummary {
    pub table: String,
    pub rows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub schema: String,
    pub tables: Vec<LoadedTableSummary>,
}

impl From<&LoadReport> for LoadSummary {
    fn from(report: &LoadReport) -> Self {
        Self {
            schema: report.schema.clone(),
            tables: report
                .tables
                .iter()
                .map(|t| LoadedTableSummary {
                    table: t.table.name().to_string(),
                    rows: t.rows,
                })
                .collect(),
        }
    }
}

/// Everything a command reports back to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    pub outputs: Vec<OutputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadSummary>,
    pub dry_run: bool,
}
