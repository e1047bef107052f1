//! Backup runs over every table
//!
//! A run rotates each table's files in the target folder and then dumps the
//! table to `{table}_{YYYY-MM-DD_HHMMSS}.csv`. All tables of one run share the
//! same timestamp. A failing table is recorded in the [`BackupReport`] and the
//! run moves on to the next one.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{error, info, warn};

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::TableName;
use crate::storage::StoreRegistry;

use super::lock::FolderLock;
use super::rotation::RotationPolicy;

/// Timestamp format of backup file names; sorts chronologically as text
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Identifier shared by every file of one backup run
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackupId(String);

impl BackupId {
    /// Identifier for a run starting now (local time)
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of a table's backup for this run
    pub fn file_name(&self, table: TableName) -> String {
        format!("{}_{}.csv", table.as_str(), self.0)
    }
}

impl fmt::Display for BackupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one table in a backup run
#[derive(Debug, Clone)]
pub struct TableBackup {
    pub table: TableName,
    /// File the table was dumped to
    pub path: PathBuf,
    /// File removed by rotation before the dump
    pub rotated: Option<PathBuf>,
    /// Rotation failure; the dump is attempted anyway
    pub rotation_error: Option<String>,
    /// Rows written, or the dump failure
    pub result: Result<usize, String>,
}

impl TableBackup {
    /// True when both rotation and dump succeeded
    pub fn is_ok(&self) -> bool {
        self.rotation_error.is_none() && self.result.is_ok()
    }

    pub fn records(&self) -> Option<usize> {
        self.result.as_ref().ok().copied()
    }
}

/// Per-table results of a backup run
#[derive(Debug, Clone)]
pub struct BackupReport {
    pub id: BackupId,
    pub folder: PathBuf,
    pub tables: Vec<TableBackup>,
}

impl BackupReport {
    /// Result for one table
    pub fn get(&self, table: TableName) -> Option<&TableBackup> {
        self.tables.iter().find(|t| t.table == table)
    }

    /// Tables with a rotation or dump failure
    pub fn failures(&self) -> impl Iterator<Item = &TableBackup> {
        self.tables.iter().filter(|t| !t.is_ok())
    }

    /// True when every table was rotated and dumped
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Rows written across all tables
    pub fn total_records(&self) -> usize {
        self.tables.iter().filter_map(TableBackup::records).sum()
    }

    /// Get a one-line summary
    pub fn summary(&self) -> String {
        let failed = self.failures().count();
        if failed == 0 {
            format!(
                "Backup {}: {} tables, {} records",
                self.id,
                self.tables.len(),
                self.total_records()
            )
        } else {
            format!(
                "Backup {}: {} of {} tables failed, {} records written",
                self.id,
                failed,
                self.tables.len(),
                self.total_records()
            )
        }
    }
}

/// Drives rotation and table dumps across all registered tables
#[derive(Clone)]
pub struct BackupCoordinator {
    registry: StoreRegistry,
}

impl BackupCoordinator {
    pub fn new(registry: StoreRegistry) -> Self {
        Self { registry }
    }

    /// Back up every table into `folder`, keeping at most `limit` files per table
    pub fn run_backup(&self, limit: usize, folder: &Path) -> TimesheetResult<BackupReport> {
        self.run_backup_with_id(limit, folder, &BackupId::now())
    }

    /// Same as [`run_backup`](Self::run_backup) with an explicit run identifier
    ///
    /// Only failing to lock or create the folder aborts the run; table
    /// failures end up in the report.
    pub fn run_backup_with_id(
        &self,
        limit: usize,
        folder: &Path,
        id: &BackupId,
    ) -> TimesheetResult<BackupReport> {
        let _guard = FolderLock::for_folder(folder).acquire()?;

        fs::create_dir_all(folder).map_err(|e| {
            TimesheetError::Io(format!(
                "Failed to create backup directory {}: {}",
                folder.display(),
                e
            ))
        })?;

        Ok(self.backup_tables(limit, folder, id))
    }

    /// Back up every table unless another run holds the folder
    ///
    /// Returns `Ok(None)` without touching the folder when it is locked.
    pub fn try_run_backup(
        &self,
        limit: usize,
        folder: &Path,
    ) -> TimesheetResult<Option<BackupReport>> {
        let Some(_guard) = FolderLock::for_folder(folder).try_acquire()? else {
            return Ok(None);
        };

        fs::create_dir_all(folder).map_err(|e| {
            TimesheetError::Io(format!(
                "Failed to create backup directory {}: {}",
                folder.display(),
                e
            ))
        })?;

        Ok(Some(self.backup_tables(limit, folder, &BackupId::now())))
    }

    /// Rotate and dump every table; the caller holds the folder lock
    pub(crate) fn backup_tables(&self, limit: usize, folder: &Path, id: &BackupId) -> BackupReport {
        let policy = RotationPolicy::new(limit);
        let mut tables = Vec::with_capacity(TableName::BACKUP_ORDER.len());

        info!(folder = %folder.display(), id = %id, "backing up tables");

        for table in TableName::BACKUP_ORDER {
            let (rotated, rotation_error) = match policy.rotate(folder, table.as_str()) {
                Ok(rotated) => (rotated, None),
                Err(e) => {
                    error!(
                        "not able to rotate {} backup files, handle the error: {}",
                        table, e
                    );
                    (None, Some(e.to_string()))
                }
            };

            let path = folder.join(id.file_name(table));
            let result = self
                .registry
                .store(table)
                .and_then(|store| store.backup_to_file(&path));

            let result = match result {
                Ok(count) => {
                    info!("- {}, {} records", table, count);
                    Ok(count)
                }
                Err(e) => {
                    error!("error during {} backup: {}", table, e);
                    Err(e.to_string())
                }
            };

            tables.push(TableBackup {
                table,
                path,
                rotated,
                rotation_error,
                result,
            });
        }

        let report = BackupReport {
            id: id.clone(),
            folder: folder.to_path_buf(),
            tables,
        };

        if report.is_complete() {
            info!("{}", report.summary());
        } else {
            warn!("{}", report.summary());
        }

        report
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::EntityStore;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// In-memory store writing a fixed number of rows
    pub(crate) struct FakeStore {
        pub rows: AtomicUsize,
        pub fail_backup: bool,
    }

    impl FakeStore {
        pub(crate) fn with_rows(rows: usize) -> Arc<Self> {
            Arc::new(Self {
                rows: AtomicUsize::new(rows),
                fail_backup: false,
            })
        }

        pub(crate) fn failing() -> Arc<Self> {
            Arc::new(Self {
                rows: AtomicUsize::new(0),
                fail_backup: true,
            })
        }
    }

    impl EntityStore for FakeStore {
        fn count(&self) -> TimesheetResult<usize> {
            Ok(self.rows.load(Ordering::SeqCst))
        }

        fn seed_from_file(&self, path: &Path) -> TimesheetResult<usize> {
            let contents = fs::read_to_string(path)?;
            let added = contents.lines().skip(1).filter(|l| !l.is_empty()).count();
            self.rows.fetch_add(added, Ordering::SeqCst);
            Ok(added)
        }

        fn backup_to_file(&self, path: &Path) -> TimesheetResult<usize> {
            if self.fail_backup {
                return Err(TimesheetError::Io("permission denied".into()));
            }
            let rows = self.rows.load(Ordering::SeqCst);
            let mut contents = String::from("id\n");
            for id in 1..=rows {
                contents.push_str(&format!("{}\n", id));
            }
            fs::write(path, contents)?;
            Ok(rows)
        }

        fn clear(&self) -> TimesheetResult<()> {
            self.rows.store(0, Ordering::SeqCst);
            Ok(())
        }
    }

    pub(crate) fn registry_with(
        overrides: &[(TableName, Arc<dyn EntityStore>)],
        seed_dir: &Path,
    ) -> StoreRegistry {
        let mut registry = StoreRegistry::new();
        for table in TableName::SEED_ORDER {
            let store = overrides
                .iter()
                .find(|(t, _)| *t == table)
                .map(|(_, s)| Arc::clone(s))
                .unwrap_or_else(|| FakeStore::with_rows(2) as Arc<dyn EntityStore>);
            registry.register(table, store, seed_dir.join(format!("{}.csv", table)));
        }
        registry
    }

    fn id_for_run(run: u32) -> BackupId {
        BackupId::from_datetime(
            NaiveDate::from_ymd_opt(2019, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, run)
                .unwrap(),
        )
    }

    fn count_files(folder: &Path, table: TableName) -> usize {
        crate::backup::rotation::retained_files(folder, table.as_str())
            .unwrap()
            .len()
    }

    #[test]
    fn test_backup_id_format() {
        let id = BackupId::from_datetime(
            NaiveDate::from_ymd_opt(2019, 3, 7)
                .unwrap()
                .and_hms_opt(9, 5, 1)
                .unwrap(),
        );
        assert_eq!(id.as_str(), "2019-03-07_090501");
        assert_eq!(
            id.file_name(TableName::ReportedRecords),
            "reported_records_2019-03-07_090501.csv"
        );
    }

    #[test]
    fn test_run_writes_one_file_per_table() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("backups");
        let coordinator = BackupCoordinator::new(registry_with(&[], temp_dir.path()));

        let report = coordinator
            .run_backup_with_id(3, &folder, &id_for_run(0))
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.total_records(), 10);
        let order: Vec<_> = report.tables.iter().map(|t| t.table).collect();
        assert_eq!(order, TableName::BACKUP_ORDER.to_vec());
        for table in TableName::SEED_ORDER {
            assert!(folder.join(id_for_run(0).file_name(table)).exists());
        }
    }

    #[test]
    fn test_rotation_bound_over_many_runs() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("backups");
        let coordinator = BackupCoordinator::new(registry_with(&[], temp_dir.path()));
        let limit = 3;

        for run in 1..=6u32 {
            coordinator
                .run_backup_with_id(limit, &folder, &id_for_run(run))
                .unwrap();
            for table in TableName::SEED_ORDER {
                assert_eq!(
                    count_files(&folder, table),
                    (run as usize).min(limit),
                    "table {} after run {}",
                    table,
                    run
                );
            }
        }

        // The newest files survive
        assert!(folder.join(id_for_run(6).file_name(TableName::Rates)).exists());
        assert!(!folder.join(id_for_run(3).file_name(TableName::Rates)).exists());
    }

    #[test]
    fn test_partial_failure_is_recorded_per_table() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("backups");
        let failing = FakeStore::failing() as Arc<dyn EntityStore>;
        let coordinator = BackupCoordinator::new(registry_with(
            &[(TableName::Consultants, failing)],
            temp_dir.path(),
        ));

        let report = coordinator
            .run_backup_with_id(5, &folder, &id_for_run(0))
            .unwrap();

        let failed: Vec<_> = report.failures().map(|t| t.table).collect();
        assert_eq!(failed, vec![TableName::Consultants]);
        assert!(report
            .get(TableName::Consultants)
            .unwrap()
            .result
            .as_ref()
            .unwrap_err()
            .contains("permission denied"));

        for table in [
            TableName::Rates,
            TableName::Projects,
            TableName::ReportedRecords,
            TableName::Holidays,
        ] {
            assert!(folder.join(id_for_run(0).file_name(table)).exists());
        }
        assert!(report.summary().contains("1 of 5 tables failed"));
    }

    #[test]
    fn test_missing_registry_entry_fails_only_that_table() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("backups");
        let mut registry = StoreRegistry::new();
        registry.register(TableName::Rates, FakeStore::with_rows(1), "rates.csv");

        let report = BackupCoordinator::new(registry)
            .run_backup_with_id(2, &folder, &id_for_run(0))
            .unwrap();

        assert!(report.get(TableName::Rates).unwrap().is_ok());
        assert_eq!(report.failures().count(), 4);
    }

    #[test]
    fn test_try_run_backup_skips_locked_folder() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("backups");
        let coordinator = BackupCoordinator::new(registry_with(&[], temp_dir.path()));

        let guard = FolderLock::for_folder(&folder).acquire().unwrap();
        assert!(coordinator.try_run_backup(3, &folder).unwrap().is_none());
        assert!(!folder.exists());

        drop(guard);
        let report = coordinator.try_run_backup(3, &folder).unwrap().unwrap();
        assert!(report.is_complete());
        assert_eq!(count_files(&folder, TableName::Rates), 1);
    }
}
