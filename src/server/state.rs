//! Shared server state

use std::path::PathBuf;
use std::sync::Arc;

use crate::backup::{BackupCoordinator, Exporter};
use crate::config::{Settings, TimesheetPaths};
use crate::seed::SeedCoordinator;
use crate::storage::StoreRegistry;

/// State shared by all handlers and background tasks
pub struct AppState {
    pub exporter: Exporter,
    pub coordinator: BackupCoordinator,
    pub seeder: Arc<SeedCoordinator>,
    /// Folder receiving scheduled backups
    pub backup_dir: PathBuf,
    pub rotation: usize,
    /// Folder holding info.log and error.log
    pub log_dir: PathBuf,
}

impl AppState {
    pub fn new(registry: StoreRegistry, settings: &Settings, paths: &TimesheetPaths) -> Self {
        Self {
            exporter: Exporter::from_settings(registry.clone(), settings, paths),
            coordinator: BackupCoordinator::new(registry.clone()),
            seeder: Arc::new(SeedCoordinator::new(registry)),
            backup_dir: settings.backup_dir(paths),
            rotation: settings.backup.rotation,
            log_dir: settings.log_dir(paths),
        }
    }
}
