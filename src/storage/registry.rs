//! Registry of table stores
//!
//! Maps each [`TableName`] to its [`EntityStore`] and seed file. Built once at
//! startup and shared by the backup, export and seed coordinators, which walk
//! their fixed table orders and look each table up here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Settings, TimesheetPaths};
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::TableName;

use super::entity::EntityStore;
use super::Storage;

/// A registered table
#[derive(Clone)]
pub struct StoreEntry {
    pub table: TableName,
    pub store: Arc<dyn EntityStore>,
    pub seed_file: PathBuf,
}

impl std::fmt::Debug for StoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreEntry")
            .field("table", &self.table)
            .field("seed_file", &self.seed_file)
            .finish_non_exhaustive()
    }
}

/// Table name to store lookup
#[derive(Clone, Default)]
pub struct StoreRegistry {
    entries: BTreeMap<TableName, StoreEntry>,
}

impl StoreRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the five tables of `storage` with their configured seed files
    pub fn from_storage(storage: &Storage, settings: &Settings, paths: &TimesheetPaths) -> Self {
        let mut registry = Self::new();
        for table in TableName::SEED_ORDER {
            registry.register(
                table,
                storage.store(table),
                settings.seed_file(paths, table),
            );
        }
        registry
    }

    /// Register or replace the store for a table
    pub fn register(
        &mut self,
        table: TableName,
        store: Arc<dyn EntityStore>,
        seed_file: impl Into<PathBuf>,
    ) -> &mut Self {
        self.entries.insert(
            table,
            StoreEntry {
                table,
                store,
                seed_file: seed_file.into(),
            },
        );
        self
    }

    /// Look up a table
    pub fn get(&self, table: TableName) -> TimesheetResult<&StoreEntry> {
        self.entries
            .get(&table)
            .ok_or_else(|| TimesheetError::table_not_found(table.as_str()))
    }

    /// Store registered for a table
    pub fn store(&self, table: TableName) -> TimesheetResult<&Arc<dyn EntityStore>> {
        Ok(&self.get(table)?.store)
    }

    /// Seed file registered for a table
    pub fn seed_file(&self, table: TableName) -> TimesheetResult<&Path> {
        Ok(&self.get(table)?.seed_file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_storage_registers_every_table() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TimesheetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let storage = Storage::new(settings.store_dir(&paths)).unwrap();

        let registry = StoreRegistry::from_storage(&storage, &settings, &paths);
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.seed_file(TableName::Projects).unwrap(),
            temp_dir.path().join("seed").join("projects.csv")
        );
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let registry = StoreRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(TableName::Holidays).unwrap_err().is_not_found());
    }
}
