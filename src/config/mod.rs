//! Configuration module for the timesheet service
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - YAML settings persistence and validation

pub mod paths;
pub mod settings;

pub use paths::TimesheetPaths;
pub use settings::Settings;
