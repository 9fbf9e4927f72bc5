//! Raw extract discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ow_model::RawTable;

use crate::error::{IngestError, Result};

/// Locations of the three raw extracts.
///
/// Defaults to `customers.csv`, `orders.csv` and `order_items.csv` inside a raw
/// directory; individual tables can be pointed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSources {
    dir: PathBuf,
    overrides: BTreeMap<RawTable, PathBuf>,
}

impl RawSources {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Use an explicit file for one table. Relative paths resolve against the raw directory.
    #[must_use]
    pub fn with_file(mut self, table: RawTable, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(table, path.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the extract for `table`.
    pub fn path(&self, table: RawTable) -> PathBuf {
        match self.overrides.get(&table) {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.dir.join(path),
            None => self.dir.join(table.default_file_name()),
        }
    }

    /// Check that every extract exists before anything is read.
    pub fn verify(&self) -> Result<()> {
        if self.overrides.len() < RawTable::ALL.len() && !self.dir.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }
        for table in RawTable::ALL {
            let path = self.path(table);
            if !path.is_file() {
                return Err(IngestError::FileNotFound { table, path });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_raw_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "header\n").unwrap();
        }
        dir
    }

    #[test]
    fn test_default_paths() {
        let sources = RawSources::in_dir("/data/raw");
        assert_eq!(
            sources.path(RawTable::OrderItems),
            PathBuf::from("/data/raw/order_items.csv")
        );
    }

    #[test]
    fn test_override_relative_and_absolute() {
        let sources = RawSources::in_dir("/data/raw")
            .with_file(RawTable::Customers, "crm_export.csv")
            .with_file(RawTable::Orders, "/mnt/orders.csv");
        assert_eq!(
            sources.path(RawTable::Customers),
            PathBuf::from("/data/raw/crm_export.csv")
        );
        assert_eq!(sources.path(RawTable::Orders), PathBuf::from("/mnt/orders.csv"));
    }

    #[test]
    fn test_verify_all_present() {
        let dir = create_raw_dir(&["customers.csv", "orders.csv", "order_items.csv"]);
        assert!(RawSources::in_dir(dir.path()).verify().is_ok());
    }

    #[test]
    fn test_verify_reports_missing_table() {
        let dir = create_raw_dir(&["customers.csv", "order_items.csv"]);
        let result = RawSources::in_dir(dir.path()).verify();
        assert!(matches!(
            result,
            Err(IngestError::FileNotFound {
                table: RawTable::Orders,
                ..
            })
        ));
    }

    #[test]
    fn test_verify_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let result = RawSources::in_dir(&missing).verify();
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
