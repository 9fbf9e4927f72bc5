//! Writing the processed directory and reading it back.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use ow_common::{parse_f64, parse_i64};
use ow_ingest::{CsvHeaders, read_csv_table};
use ow_model::{DimCustomer, FctOrder, FctOrderItem, ProcessedTable, ProcessedTables};
use ow_transform::parse_timestamp;
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{OutputError, Result};
use crate::frames::table_frame;
use crate::hash::compute_file_hash;

/// One table written to the processed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub table: ProcessedTable,
    pub path: PathBuf,
    pub rows: usize,
    /// SHA-256 of the file contents, lowercase hex.
    pub sha256: String,
}

fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.tmp"))
}

fn write_frame_to(path: &Path, table: ProcessedTable, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|e| OutputError::Io {
        operation: "create",
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| OutputError::CsvWrite {
            table,
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    file.sync_all().map_err(|e| OutputError::Io {
        operation: "sync",
        path: path.to_path_buf(),
        source: e,
    })
}

fn remove_temp_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "could not remove temporary file");
        }
    }
}

/// Write the three processed tables into `dir`.
///
/// Every table goes to a hidden temporary file next to its target first. Only
/// when all three are written and synced are they renamed into place; if any
/// write fails the temporaries are removed and existing files are untouched.
pub fn write_processed(dir: &Path, tables: &ProcessedTables) -> Result<Vec<WrittenTable>> {
    let start = Instant::now();
    fs::create_dir_all(dir).map_err(|e| OutputError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut staged: Vec<(ProcessedTable, PathBuf, PathBuf, usize)> = Vec::new();
    for table in ProcessedTable::ALL {
        let target = dir.join(table.file_name());
        let temp = temp_path_for(&target);
        let written = table_frame(tables, table).and_then(|mut df| {
            write_frame_to(&temp, table, &mut df)?;
            Ok(df.height())
        });
        match written {
            Ok(rows) => {
                debug!(table = %table, rows, temp = %temp.display(), "staged table");
                staged.push((table, temp, target, rows));
            }
            Err(err) => {
                let mut leftovers: Vec<PathBuf> =
                    staged.into_iter().map(|(_, temp, _, _)| temp).collect();
                if temp.exists() {
                    leftovers.push(temp);
                }
                remove_temp_files(&leftovers);
                return Err(err);
            }
        }
    }

    let mut written = Vec::with_capacity(staged.len());
    for (table, temp, target, rows) in staged {
        fs::rename(&temp, &target).map_err(|e| OutputError::AtomicWriteFailed {
            temp_path: temp.clone(),
            target_path: target.clone(),
            source: e,
        })?;
        let sha256 = compute_file_hash(&target)?;
        written.push(WrittenTable {
            table,
            path: target,
            rows,
            sha256,
        });
    }

    info!(
        dir = %dir.display(),
        tables = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "processed tables written"
    );
    Ok(written)
}

/// Output columns of a processed file resolved to frame columns.
struct OutputColumns<'a> {
    table: ProcessedTable,
    columns: Vec<&'a Column>,
}

impl<'a> OutputColumns<'a> {
    fn resolve(
        df: &'a DataFrame,
        headers: &CsvHeaders,
        table: ProcessedTable,
        path: &Path,
    ) -> Result<Self> {
        let frame_columns = df.get_columns();
        let mut columns = Vec::with_capacity(table.columns().len());
        for name in table.columns() {
            let column = headers
                .position(name)
                .and_then(|idx| frame_columns.get(idx))
                .ok_or_else(|| OutputError::MissingColumn {
                    table,
                    column: (*name).to_string(),
                    path: path.to_path_buf(),
                })?;
            columns.push(column);
        }
        Ok(Self { table, columns })
    }

    fn text(&self, column: usize, row: usize) -> String {
        let value = self.columns[column].get(row).unwrap_or(AnyValue::Null);
        ow_common::any_to_string(value)
    }

    fn required<T>(
        &self,
        column: usize,
        row: usize,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        let text = self.text(column, row);
        parse(&text).ok_or_else(|| OutputError::InvalidValue {
            table: self.table,
            column: self.table.columns()[column],
            row,
            value: text,
        })
    }
}

fn read_table(dir: &Path, table: ProcessedTable) -> Result<(DataFrame, CsvHeaders, PathBuf)> {
    let path = dir.join(table.file_name());
    if !path.is_file() {
        return Err(OutputError::Io {
            operation: "open",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "processed table not found"),
            path,
        });
    }
    let (df, headers) = read_csv_table(&path)?;
    Ok((df, headers, path))
}

/// Read the three processed tables back from `dir`.
///
/// Nullable cells (`customer_id` of the dimension, timestamps) go through the
/// tolerant parsers; every other numeric cell must parse.
pub fn read_processed(dir: &Path) -> Result<ProcessedTables> {
    let (df, headers, path) = read_table(dir, ProcessedTable::DimCustomers)?;
    let cols = OutputColumns::resolve(&df, &headers, ProcessedTable::DimCustomers, &path)?;
    let dim_customers = (0..df.height())
        .map(|row| DimCustomer {
            customer_id: parse_i64(&cols.text(0, row)),
            email: cols.text(1, row),
            full_name: cols.text(2, row),
            updated_at: parse_timestamp(&cols.text(3, row)),
        })
        .collect();

    let (df, headers, path) = read_table(dir, ProcessedTable::FctOrders)?;
    let cols = OutputColumns::resolve(&df, &headers, ProcessedTable::FctOrders, &path)?;
    let fct_orders = (0..df.height())
        .map(|row| {
            Ok(FctOrder {
                order_id: cols.text(0, row),
                customer_id: cols.required(1, row, parse_i64)?,
                order_date: parse_timestamp(&cols.text(2, row)),
                order_total: cols.required(3, row, parse_f64)?,
                item_count: cols.required(4, row, parse_i64)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (df, headers, path) = read_table(dir, ProcessedTable::FctOrderItems)?;
    let cols = OutputColumns::resolve(&df, &headers, ProcessedTable::FctOrderItems, &path)?;
    let fct_order_items = (0..df.height())
        .map(|row| {
            Ok(FctOrderItem {
                order_id: cols.text(0, row),
                product_sku: cols.text(1, row),
                quantity: cols.required(2, row, parse_f64)?,
                unit_price: cols.required(3, row, parse_f64)?,
                line_total: cols.required(4, row, parse_f64)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let tables = ProcessedTables {
        dim_customers,
        fct_orders,
        fct_order_items,
    };
    let [customers, orders, items] = tables.row_counts();
    info!(dir = %dir.display(), customers, orders, items, "processed tables read");
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/data/processed/fct_orders.csv"));
        assert_eq!(temp, PathBuf::from("/data/processed/.fct_orders.csv.tmp"));
    }
}
