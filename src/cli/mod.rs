//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup, export and seed
//! coordinators.

pub mod backup;
pub mod config;
pub mod reset;
pub mod seed;
pub mod serve;

pub use backup::{handle_backup_command, handle_export_command};
pub use config::handle_config_command;
pub use reset::handle_reset_command;
pub use seed::{handle_check_command, handle_seed_command};
pub use serve::handle_serve_command;
