//! First-run data seeding
//!
//! Loads a table from its configured CSV file. The automatic startup path only
//! seeds empty tables, so it can run on every start without duplicating data.
//! An explicit operator request can force a reseed regardless of the current
//! row count.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing::{error, info, warn};

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::TableName;
use crate::storage::StoreRegistry;

/// Rows loaded into one table from one seed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRecord {
    pub table: TableName,
    pub path: PathBuf,
    pub count: usize,
}

/// Outcome of seeding one table as part of an all-tables run
#[derive(Debug, Clone)]
pub struct TableSeed {
    pub table: TableName,
    pub result: Result<SeedRecord, String>,
}

/// Per-table results of seeding every table
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub tables: Vec<TableSeed>,
}

impl SeedReport {
    /// Result for one table
    pub fn get(&self, table: TableName) -> Option<&TableSeed> {
        self.tables.iter().find(|t| t.table == table)
    }

    /// Rows loaded across all tables
    pub fn total_records(&self) -> usize {
        self.tables
            .iter()
            .filter_map(|t| t.result.as_ref().ok())
            .map(|r| r.count)
            .sum()
    }

    /// Tables that failed to seed
    pub fn failures(&self) -> impl Iterator<Item = &TableSeed> {
        self.tables.iter().filter(|t| t.result.is_err())
    }

    /// Tables that received rows
    pub fn seeded(&self) -> impl Iterator<Item = &SeedRecord> {
        self.tables
            .iter()
            .filter_map(|t| t.result.as_ref().ok())
            .filter(|r| r.count > 0)
    }
}

/// Which tables a seed request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTarget {
    All,
    Table(TableName),
}

impl FromStr for SeedTarget {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<TableName>().map(Self::Table).map_err(|_| {
            TimesheetError::Validation(format!("unable to seed non-existent table: {}", s))
        })
    }
}

impl fmt::Display for SeedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Table(table) => table.fmt(f),
        }
    }
}

/// Seeds tables from their registered seed files
pub struct SeedCoordinator {
    registry: StoreRegistry,
    locks: HashMap<TableName, Mutex<()>>,
}

impl SeedCoordinator {
    pub fn new(registry: StoreRegistry) -> Self {
        let locks = TableName::SEED_ORDER
            .into_iter()
            .map(|table| (table, Mutex::new(())))
            .collect();
        Self { registry, locks }
    }

    /// Seed `table` only if it has no rows; returns the rows loaded
    pub fn seed_if_empty(&self, table: TableName) -> TimesheetResult<usize> {
        Ok(self.seed_table(table, false)?.count)
    }

    /// Seed `table` regardless of its current rows; returns the rows loaded
    pub fn force_seed(&self, table: TableName) -> TimesheetResult<usize> {
        Ok(self.seed_table(table, true)?.count)
    }

    /// Seed every empty table, continuing past failures
    pub fn seed_all(&self) -> SeedReport {
        self.seed_tables(false)
    }

    /// Reseed every table, continuing past failures
    pub fn force_seed_all(&self) -> SeedReport {
        self.seed_tables(true)
    }

    /// Seed the requested tables
    pub fn seed(&self, target: SeedTarget, force: bool) -> TimesheetResult<SeedReport> {
        match target {
            SeedTarget::All if force => Ok(self.force_seed_all()),
            SeedTarget::All => Ok(self.seed_all()),
            SeedTarget::Table(table) => {
                let record = self.seed_table(table, force)?;
                Ok(SeedReport {
                    tables: vec![TableSeed {
                        table,
                        result: Ok(record),
                    }],
                })
            }
        }
    }

    fn seed_tables(&self, force: bool) -> SeedReport {
        info!("Loaded table, # of records, filename:");

        let tables = TableName::SEED_ORDER
            .into_iter()
            .map(|table| {
                let result = self.seed_table(table, force).map_err(|e| {
                    error!("unable to seed {}: {}", table, e);
                    e.to_string()
                });
                TableSeed { table, result }
            })
            .collect();

        let report = SeedReport { tables };
        if report.seeded().next().is_some() {
            info!("loaded missing required data (see tables above)");
        }
        report
    }

    fn seed_table(&self, table: TableName, force: bool) -> TimesheetResult<SeedRecord> {
        let entry = self.registry.get(table)?;

        let _guard = match self.locks.get(&table) {
            Some(lock) => Some(lock.lock().map_err(|e| {
                TimesheetError::Storage(format!("Failed to acquire seed lock: {}", e))
            })?),
            None => None,
        };

        let path = entry.seed_file.clone();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        if !force {
            let existing = entry.store.count()?;
            if existing > 0 {
                warn!(
                    "- {}, file {} skipped, table contains {} records",
                    table, file_name, existing
                );
                return Ok(SeedRecord {
                    table,
                    path,
                    count: 0,
                });
            }
        }

        let count = entry.store.seed_from_file(&path)?;
        info!("- {}, {} records, {}", table, count, file_name);

        Ok(SeedRecord { table, path, count })
    }
}
