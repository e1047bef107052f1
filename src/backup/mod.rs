//! Backup system for the timesheet service
//!
//! Dumps every table to CSV, keeps a bounded history per table and bundles the
//! current dumps into a downloadable archive.
//!
//! # Architecture
//!
//! - `RotationPolicy`: deletes the oldest backup of a table once the
//!   configured number of files is reached
//! - `BackupCoordinator`: rotates and dumps every table with one shared
//!   run timestamp, collecting a per-table `BackupReport`
//! - `Exporter`: clear, backup and zip in one locked sequence
//! - `FolderLock`: exclusive advisory lock per backup or export folder
//!
//! # Backup Format
//!
//! One CSV file per table and run, named `{table}_{YYYY-MM-DD_HHMMSS}.csv`.
//!
//! # Example
//!
//! ```rust,ignore
//! use timesheet::backup::{BackupCoordinator, Exporter};
//!
//! let coordinator = BackupCoordinator::new(registry.clone());
//! let report = coordinator.run_backup(settings.backup.rotation, &backup_dir)?;
//! println!("{}", report.summary());
//!
//! let exporter = Exporter::from_settings(registry, &settings, &paths);
//! let archive = exporter.export()?;
//! ```

mod coordinator;
mod export;
mod lock;
mod rotation;

pub use coordinator::{BackupCoordinator, BackupId, BackupReport, TableBackup, TIMESTAMP_FORMAT};
pub use export::{Exporter, DEFAULT_ARCHIVE_NAME};
pub use lock::{FolderLock, FolderLockGuard};
pub use rotation::{retained_files, rotate, BackupFile, RotationPolicy};
