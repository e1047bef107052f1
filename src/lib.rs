//! Timesheet - backup, export and seeding for the consultant timesheet backend
//!
//! This library keeps the timesheet tables (rates, consultants, projects,
//! reported records and holidays) safe: it dumps them to rotated CSV backups,
//! bundles a fresh backup into a downloadable ZIP archive, and seeds empty
//! tables from CSV files on first run.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Table names and record types
//! - `storage`: JSON file storage and the table registry
//! - `backup`: Rotated CSV backups, export archive and folder locking
//! - `seed`: First-run seeding from CSV
//! - `logging`: Log file setup
//! - `server`: HTTP download endpoints and scheduled backups
//! - `cli`, `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use timesheet::backup::BackupCoordinator;
//! use timesheet::config::{Settings, TimesheetPaths};
//! use timesheet::storage::{Storage, StoreRegistry};
//!
//! let paths = TimesheetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(settings.store_dir(&paths))?;
//! storage.load_all()?;
//!
//! let registry = StoreRegistry::from_storage(&storage, &settings, &paths);
//! let report = BackupCoordinator::new(registry)
//!     .run_backup(settings.backup.rotation, &settings.backup_dir(&paths))?;
//! println!("{}", report.summary());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod seed;
pub mod server;
pub mod storage;

pub use error::{TimesheetError, TimesheetResult};
