//! Generic table repository for JSON storage
//!
//! Each table is kept in memory behind an `RwLock` and persisted as
//! `{table}.json` in the store folder.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{Record, RecordId};

use super::entity::EntityStore;
use super::file_io::{read_csv, read_json, write_csv, write_json_atomic};

/// Serializable table file structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(bound = "T: Record")]
struct TableData<T> {
    rows: Vec<T>,
}

impl<T> Default for TableData<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

/// Repository for one table's rows
pub struct TableRepository<T: Record> {
    path: PathBuf,
    data: RwLock<Vec<T>>,
}

impl<T: Record> TableRepository<T> {
    /// Create a new repository backed by the file at `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load rows from disk
    pub fn load(&self) -> TimesheetResult<()> {
        let file_data: TableData<T> = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.rows;

        Ok(())
    }

    /// Save rows to disk
    pub fn save(&self) -> TimesheetResult<()> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        self.persist(&data)
    }

    fn persist(&self, rows: &[T]) -> TimesheetResult<()> {
        write_json_atomic(
            &self.path,
            &TableData {
                rows: rows.to_vec(),
            },
        )
    }

    /// Get all rows in id order
    pub fn get_all(&self) -> TimesheetResult<Vec<T>> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut rows = data.clone();
        rows.sort_by_key(|row| row.id());
        Ok(rows)
    }

    /// Get a row by id
    pub fn get(&self, id: RecordId) -> TimesheetResult<Option<T>> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|row| row.id() == id).cloned())
    }

    /// Append rows with freshly assigned ids and persist the table
    ///
    /// Nothing changes in memory if writing the table file fails.
    pub fn append(&self, rows: Vec<T>) -> TimesheetResult<usize> {
        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut next_id = data.iter().map(|row| row.id()).max().unwrap_or(0) + 1;
        let added = rows.len();

        let mut updated = data.clone();
        for mut row in rows {
            row.set_id(next_id);
            next_id += 1;
            updated.push(row);
        }

        self.persist(&updated)?;
        *data = updated;

        Ok(added)
    }

    /// Append a single row, returning its id
    pub fn insert(&self, row: T) -> TimesheetResult<RecordId> {
        self.append(vec![row])?;
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().map(|row| row.id()).max().unwrap_or(0))
    }
}

impl<T: Record> EntityStore for TableRepository<T> {
    fn count(&self) -> TimesheetResult<usize> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    fn seed_from_file(&self, path: &Path) -> TimesheetResult<usize> {
        let rows: Vec<T> = read_csv(path)?;
        self.append(rows)
    }

    fn backup_to_file(&self, path: &Path) -> TimesheetResult<usize> {
        let rows = self.get_all()?;
        write_csv(path, &rows)
    }

    fn clear(&self) -> TimesheetResult<()> {
        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        self.persist(&[])?;
        data.clear();

        Ok(())
    }
}
