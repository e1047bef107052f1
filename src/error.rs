//! Custom error types for the timesheet service
//!
//! This module defines the error hierarchy for the backup, export and seed
//! subsystem using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for timesheet operations
#[derive(Error, Debug)]
pub enum TimesheetError {
    /// Configuration-related errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export archive errors
    #[error("Export error: {0}")]
    Export(String),

    /// Folder lock errors
    #[error("Lock error: {0}")]
    Lock(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TimesheetError {
    /// Create a "not found" error for tables missing from the store registry
    pub fn table_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Table",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TimesheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TimesheetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for TimesheetError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<csv::Error> for TimesheetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<zip::result::ZipError> for TimesheetError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for timesheet operations
pub type TimesheetResult<T> = Result<T, TimesheetError>;
