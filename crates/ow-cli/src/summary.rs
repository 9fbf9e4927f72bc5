//! Human-readable and JSON rendering of a command report.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{CommandReport, LoadSummary, OutputFile, RunSummary};

pub fn print_report(report: &CommandReport) {
    if let Some(summary) = &report.summary {
        println!("{}", summary_table(summary));
        println!("Orders without items: {}", summary.orders_without_items);
    }
    if report.dry_run {
        println!("Dry run: nothing written or loaded.");
    }
    if !report.outputs.is_empty() {
        println!("{}", outputs_table(&report.outputs));
    }
    if let Some(load) = &report.load {
        println!("{}", load_table(load));
    }
}

pub fn print_report_json(report: &CommandReport) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Input, output and dropped rows per table.
pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Input rows"),
        header_cell("Output rows"),
        header_cell("Dropped"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let rows = [
        (
            "dim_customers",
            summary.customers_in,
            summary.customers_out,
            summary.customers_collapsed(),
            "duplicate customer_id",
        ),
        (
            "fct_orders",
            summary.orders_in,
            summary.orders_out,
            summary.orders_dropped(),
            "unknown customer",
        ),
        (
            "fct_order_items",
            summary.items_in,
            summary.items_out,
            summary.items_dropped(),
            "quantity < 1 or unit_price <= 0",
        ),
    ];
    for (name, input, output, dropped, reason) in rows {
        table.add_row(vec![
            Cell::new(name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(input),
            Cell::new(output),
            count_cell(dropped),
            dim_cell(reason),
        ]);
    }
    table
}

pub fn outputs_table(outputs: &[OutputFile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in outputs {
        table.add_row(vec![
            Cell::new(output.path.display()),
            Cell::new(output.rows),
            dim_cell(short_digest(&output.sha256)),
        ]);
    }
    table
}

pub fn load_table(load: &LoadSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Loaded table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for loaded in &load.tables {
        table.add_row(vec![
            Cell::new(format!("{}.{}", load.schema, loaded.table)),
            Cell::new(loaded.rows),
        ]);
    }
    table
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary {
            customers_in: 2,
            customers_out: 1,
            orders_in: 2,
            orders_out: 1,
            items_in: 2,
            items_out: 1,
            orders_without_items: 0,
        }
    }

    #[test]
    fn test_summary_table_lists_every_table() {
        let mut table = summary_table(&summary());
        table.force_no_tty();
        let rendered = table.to_string();
        for name in ["dim_customers", "fct_orders", "fct_order_items"] {
            assert!(rendered.contains(name), "missing {name} in\n{rendered}");
        }
        assert!(rendered.contains("unknown customer"));
    }

    #[test]
    fn test_short_digest() {
        assert_eq!(short_digest("0123456789abcdef"), "0123456789ab");
        assert_eq!(short_digest("abc"), "abc");
    }

    #[test]
    fn test_report_json_shape() {
        let report = CommandReport {
            summary: Some(summary()),
            outputs: Vec::new(),
            load: None,
            dry_run: true,
        };
        insta::assert_json_snapshot!(report, @r#"
        {
          "summary": {
            "customers_in": 2,
            "customers_out": 1,
            "orders_in": 2,
            "orders_out": 1,
            "items_in": 2,
            "items_out": 1,
            "orders_without_items": 0
          },
          "outputs": [],
          "dry_run": true
        }
        "#);
    }
}
