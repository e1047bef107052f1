//! Settings for the timesheet service
//!
//! Every component receives its configuration explicitly from this struct:
//! rotation limit, folder locations, per-table seed file names, store type,
//! logging and server options. The settings file is YAML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::TimesheetPaths;
use crate::error::TimesheetError;
use crate::models::TableName;

/// The only supported store type
pub const JSON_STORE: &str = "json";

/// Longest accepted scheduled backup period, one year
pub const MAX_BACKUP_INTERVAL_MINUTES: u64 = 365 * 24 * 60;

/// Table store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store backend identifier
    #[serde(default = "default_store_type")]
    pub store_type: String,

    /// Folder holding one JSON file per table
    #[serde(default = "default_store_location")]
    pub location: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_type: default_store_type(),
            location: default_store_location(),
        }
    }
}

/// Backup rotation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Maximum number of backup files kept per table
    #[serde(default = "default_rotation")]
    pub rotation: usize,

    /// Folder receiving scheduled and on-demand backups
    #[serde(default = "default_backup_location")]
    pub location: PathBuf,

    /// Minutes between scheduled backups while serving; 0 disables them
    #[serde(default)]
    pub interval_minutes: u64,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            rotation: default_rotation(),
            location: default_backup_location(),
            interval_minutes: 0,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Scratch folder cleared and refilled on every export
    #[serde(default = "default_export_location")]
    pub location: PathBuf,

    /// Archive produced by an export
    #[serde(default = "default_archive")]
    pub archive: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            location: default_export_location(),
            archive: default_archive(),
        }
    }
}

/// Seed file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Folder holding the seed CSV files
    #[serde(default = "default_seed_location")]
    pub location: PathBuf,

    #[serde(default = "default_rates_file")]
    pub rates: String,

    #[serde(default = "default_consultants_file")]
    pub consultants: String,

    #[serde(default = "default_projects_file")]
    pub projects: String,

    #[serde(default = "default_reported_records_file")]
    pub reported_records: String,

    #[serde(default = "default_holidays_file")]
    pub holidays: String,
}

impl SeedSettings {
    /// Seed file name configured for a table
    pub fn file_for(&self, table: TableName) -> &str {
        match table {
            TableName::Rates => &self.rates,
            TableName::Consultants => &self.consultants,
            TableName::Projects => &self.projects,
            TableName::ReportedRecords => &self.reported_records,
            TableName::Holidays => &self.holidays,
        }
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            location: default_seed_location(),
            rates: default_rates_file(),
            consultants: default_consultants_file(),
            projects: default_projects_file(),
            reported_records: default_reported_records_file(),
            holidays: default_holidays_file(),
        }
    }
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Folder receiving info.log and error.log
    #[serde(default = "default_log_folder")]
    pub folder: PathBuf,

    /// Level filter for the console and info log
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            folder: default_log_folder(),
            level: default_log_level(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Settings for the timesheet service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub backup: BackupSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub seed: SeedSettings,

    #[serde(default)]
    pub logging: LogSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_store_type() -> String {
    JSON_STORE.to_string()
}

fn default_store_location() -> PathBuf {
    PathBuf::from("data")
}

fn default_rotation() -> usize {
    5
}

fn default_backup_location() -> PathBuf {
    PathBuf::from("backups")
}

fn default_export_location() -> PathBuf {
    PathBuf::from("export")
}

fn default_archive() -> PathBuf {
    PathBuf::from("timesheet-backup.zip")
}

fn default_seed_location() -> PathBuf {
    PathBuf::from("seed")
}

fn default_rates_file() -> String {
    "rates.csv".to_string()
}

fn default_consultants_file() -> String {
    "consultants.csv".to_string()
}

fn default_projects_file() -> String {
    "projects.csv".to_string()
}

fn default_reported_records_file() -> String {
    "reported_records.csv".to_string()
}

fn default_holidays_file() -> String {
    "holidays.csv".to_string()
}

fn default_log_folder() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            store: StoreSettings::default(),
            backup: BackupSettings::default(),
            export: ExportSettings::default(),
            seed: SeedSettings::default(),
            logging: LogSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    ///
    /// The loaded settings are validated before being returned.
    pub fn load_or_create(paths: &TimesheetPaths) -> Result<Self, TimesheetError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TimesheetError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_yaml::from_str(&contents).map_err(|e| {
                TimesheetError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TimesheetPaths) -> Result<(), TimesheetError> {
        paths.ensure_base_dir()?;

        let contents = serde_yaml::to_string(self).map_err(|e| {
            TimesheetError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            TimesheetError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), TimesheetError> {
        if self.store.store_type != JSON_STORE {
            return Err(TimesheetError::Config(format!(
                "unsupported store type '{}', supported types: ({})",
                self.store.store_type, JSON_STORE
            )));
        }

        if self.backup.rotation == 0 {
            return Err(TimesheetError::Config(
                "backup.rotation must keep at least one file per table".into(),
            ));
        }

        if self.backup.interval_minutes > MAX_BACKUP_INTERVAL_MINUTES {
            return Err(TimesheetError::Config(format!(
                "backup.interval_minutes must be at most {}, got {}",
                MAX_BACKUP_INTERVAL_MINUTES, self.backup.interval_minutes
            )));
        }

        if self.export.archive.file_name().is_none() {
            return Err(TimesheetError::Config(format!(
                "export.archive '{}' does not name a file",
                self.export.archive.display()
            )));
        }

        Ok(())
    }

    /// Folder holding the JSON table files
    pub fn store_dir(&self, paths: &TimesheetPaths) -> PathBuf {
        paths.resolve(&self.store.location)
    }

    /// Folder receiving backups
    pub fn backup_dir(&self, paths: &TimesheetPaths) -> PathBuf {
        paths.resolve(&self.backup.location)
    }

    /// Scratch folder used by exports
    pub fn export_dir(&self, paths: &TimesheetPaths) -> PathBuf {
        paths.resolve(&self.export.location)
    }

    /// Path of the export archive
    pub fn archive_path(&self, paths: &TimesheetPaths) -> PathBuf {
        paths.resolve(&self.export.archive)
    }

    /// Folder receiving log files
    pub fn log_dir(&self, paths: &TimesheetPaths) -> PathBuf {
        paths.resolve(&self.logging.folder)
    }

    /// Period of scheduled backups, or `None` when they are disabled
    pub fn backup_interval(&self) -> Option<Duration> {
        match self.backup.interval_minutes {
            0 => None,
            minutes => Some(Duration::from_secs(minutes.saturating_mul(60))),
        }
    }

    /// Full path of the seed file for a table
    pub fn seed_file(&self, paths: &TimesheetPaths, table: TableName) -> PathBuf {
        seed_path(&paths.resolve(&self.seed.location), self.seed.file_for(table))
    }
}

fn seed_path(folder: &Path, file: &str) -> PathBuf {
    folder.join(file)
}
