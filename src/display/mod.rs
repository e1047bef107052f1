//! Display formatting for terminal output
//!
//! Renders backup and seed reports as tables for the CLI.

pub mod backup;
pub mod seed;

pub use backup::format_backup_report;
pub use seed::format_seed_report;
