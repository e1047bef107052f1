//! Storage layer for the timesheet service
//!
//! Provides the [`EntityStore`] capability, a JSON file backed implementation
//! of it for every table, and the registry that maps tables to stores.

pub mod entity;
pub mod file_io;
pub mod registry;
pub mod table;

pub use entity::EntityStore;
pub use file_io::{read_csv, read_json, write_csv, write_json_atomic};
pub use registry::{StoreEntry, StoreRegistry};
pub use table::TableRepository;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::TimesheetError;
use crate::models::{Consultant, Holiday, Project, Rate, Record, ReportedRecord, TableName};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    dir: PathBuf,
    pub rates: Arc<TableRepository<Rate>>,
    pub consultants: Arc<TableRepository<Consultant>>,
    pub projects: Arc<TableRepository<Project>>,
    pub reported_records: Arc<TableRepository<ReportedRecord>>,
    pub holidays: Arc<TableRepository<Holiday>>,
}

impl Storage {
    /// Create a new Storage instance keeping its table files in `dir`
    pub fn new(dir: PathBuf) -> Result<Self, TimesheetError> {
        std::fs::create_dir_all(&dir).map_err(|e| {
            TimesheetError::Io(format!("Failed to create store directory: {}", e))
        })?;

        Ok(Self {
            rates: repository(&dir),
            consultants: repository(&dir),
            projects: repository(&dir),
            reported_records: repository(&dir),
            holidays: repository(&dir),
            dir,
        })
    }

    /// Folder holding the table files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all tables from disk
    pub fn load_all(&self) -> Result<(), TimesheetError> {
        self.rates.load()?;
        self.consultants.load()?;
        self.projects.load()?;
        self.reported_records.load()?;
        self.holidays.load()?;
        Ok(())
    }

    /// Save all tables to disk
    pub fn save_all(&self) -> Result<(), TimesheetError> {
        self.rates.save()?;
        self.consultants.save()?;
        self.projects.save()?;
        self.reported_records.save()?;
        self.holidays.save()?;
        Ok(())
    }

    /// The repository of a table as an [`EntityStore`]
    pub fn store(&self, table: TableName) -> Arc<dyn EntityStore> {
        match table {
            TableName::Rates => Arc::clone(&self.rates) as Arc<dyn EntityStore>,
            TableName::Consultants => Arc::clone(&self.consultants) as Arc<dyn EntityStore>,
            TableName::Projects => Arc::clone(&self.projects) as Arc<dyn EntityStore>,
            TableName::ReportedRecords => Arc::clone(&self.reported_records) as Arc<dyn EntityStore>,
            TableName::Holidays => Arc::clone(&self.holidays) as Arc<dyn EntityStore>,
        }
    }
}

fn repository<T: Record>(dir: &Path) -> Arc<TableRepository<T>> {
    Arc::new(TableRepository::new(
        dir.join(format!("{}.json", T::TABLE.as_str())),
    ))
}
