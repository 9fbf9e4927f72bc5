//! SQL text for the destination tables.
//!
//! Everything here is pure string building so it can be checked without a
//! database.

use ow_model::ProcessedTable;

use crate::error::{LoadError, Result};

/// Postgres caps a statement at this many bind parameters.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Upper bound on rows per INSERT statement.
pub const MAX_ROWS_PER_INSERT: usize = 1_000;

/// Destination column types, in output column order.
pub fn column_types(table: ProcessedTable) -> &'static [(&'static str, &'static str)] {
    match table {
        ProcessedTable::DimCustomers => &[
            ("customer_id", "BIGINT"),
            ("email", "TEXT NOT NULL"),
            ("full_name", "TEXT NOT NULL"),
            ("updated_at", "TIMESTAMP"),
        ],
        ProcessedTable::FctOrders => &[
            ("order_id", "TEXT NOT NULL"),
            ("customer_id", "BIGINT NOT NULL"),
            ("order_date", "TIMESTAMP"),
            ("order_total", "DOUBLE PRECISION NOT NULL"),
            ("item_count", "BIGINT NOT NULL"),
        ],
        ProcessedTable::FctOrderItems => &[
            ("order_id", "TEXT NOT NULL"),
            ("product_sku", "TEXT NOT NULL"),
            ("quantity", "DOUBLE PRECISION NOT NULL"),
            ("unit_price", "DOUBLE PRECISION NOT NULL"),
            ("line_total", "DOUBLE PRECISION NOT NULL"),
        ],
    }
}

/// Accept only `[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid_start && valid_rest && name.len() <= 63 {
        Ok(())
    } else {
        Err(LoadError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// `"schema"."table"`.
pub fn qualified_name(schema: &str, table: ProcessedTable) -> String {
    format!("\"{schema}\".\"{}\"", table.name())
}

pub fn create_schema_sql(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\"")
}

pub fn drop_table_sql(schema: &str, table: ProcessedTable) -> String {
    format!("DROP TABLE IF EXISTS {}", qualified_name(schema, table))
}

pub fn create_table_sql(schema: &str, table: ProcessedTable) -> String {
    let columns: Vec<String> = column_types(table)
        .iter()
        .map(|(name, ty)| format!("{name} {ty}"))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        qualified_name(schema, table),
        columns.join(", ")
    )
}

/// Statement prefix; the VALUES list is appended per batch.
pub fn insert_prefix(schema: &str, table: ProcessedTable) -> String {
    format!(
        "INSERT INTO {} ({}) ",
        qualified_name(schema, table),
        table.columns().join(", ")
    )
}

/// Rows per INSERT so a batch never exceeds the bind-parameter limit.
pub fn rows_per_insert(table: ProcessedTable) -> usize {
    let width = table.columns().len().max(1);
    (MAX_BIND_PARAMS / width).min(MAX_ROWS_PER_INSERT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_types_follow_output_columns() {
        for table in ProcessedTable::ALL {
            let names: Vec<&str> = column_types(table).iter().map(|(n, _)| *n).collect();
            assert_eq!(names, table.columns());
        }
    }

    #[test]
    fn test_create_table_sql() {
        assert_eq!(
            create_table_sql("analytics", ProcessedTable::DimCustomers),
            "CREATE TABLE \"analytics\".\"dim_customers\" (customer_id BIGINT, \
             email TEXT NOT NULL, full_name TEXT NOT NULL, updated_at TIMESTAMP)"
        );
    }

    #[test]
    fn test_refresh_statements() {
        assert_eq!(
            create_schema_sql("analytics"),
            "CREATE SCHEMA IF NOT EXISTS \"analytics\""
        );
        assert_eq!(
            drop_table_sql("analytics", ProcessedTable::FctOrders),
            "DROP TABLE IF EXISTS \"analytics\".\"fct_orders\""
        );
        assert_eq!(
            insert_prefix("analytics", ProcessedTable::FctOrderItems),
            "INSERT INTO \"analytics\".\"fct_order_items\" \
             (order_id, product_sku, quantity, unit_price, line_total) "
        );
    }

    #[test]
    fn test_rows_per_insert_respects_bind_limit() {
        for table in ProcessedTable::ALL {
            let rows = rows_per_insert(table);
            assert!(rows * table.columns().len() <= MAX_BIND_PARAMS);
            assert_eq!(rows, MAX_ROWS_PER_INSERT);
        }
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("analytics").is_ok());
        assert!(validate_identifier("_stage_2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("a\"b").is_err());
        assert!(validate_identifier(&"x".repeat(64)).is_err());
    }
}
