//! Path management for the timesheet service
//!
//! Resolves the base directory that holds the settings file, the JSON table
//! store, the seed CSV files, backups, exports and logs.
//!
//! ## Path Resolution Order
//!
//! 1. `TIMESHEET_HOME` environment variable (if set)
//! 2. The platform config directory joined with `timesheet`
//!    (`~/.config/timesheet`, `%APPDATA%\timesheet`, ...)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::TimesheetError;

/// Environment variable overriding the base directory
pub const HOME_ENV_VAR: &str = "TIMESHEET_HOME";

/// Manages all paths used by the timesheet service
#[derive(Debug, Clone)]
pub struct TimesheetPaths {
    /// Base directory for all timesheet data
    base_dir: PathBuf,
}

impl TimesheetPaths {
    /// Create a new TimesheetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TimesheetError> {
        let base_dir = if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TimesheetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("timesheet.yaml")
    }

    /// Resolve a configured location against the base directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, location: impl AsRef<Path>) -> PathBuf {
        let location = location.as_ref();
        if location.is_absolute() {
            location.to_path_buf()
        } else {
            self.base_dir.join(location)
        }
    }

    /// Ensure the base directory exists
    pub fn ensure_base_dir(&self) -> Result<(), TimesheetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TimesheetError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, TimesheetError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| TimesheetError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("timesheet"))
}
