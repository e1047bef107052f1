//! Config CLI command

use crate::config::{Settings, TimesheetPaths};
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::TableName;

/// Print resolved locations and the effective settings
pub fn handle_config_command(paths: &TimesheetPaths, settings: &Settings) -> TimesheetResult<()> {
    println!("Timesheet Configuration");
    println!("=======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Data directory:   {}", settings.store_dir(paths).display());
    println!("Backup directory: {}", settings.backup_dir(paths).display());
    println!("Export directory: {}", settings.export_dir(paths).display());
    println!("Archive:          {}", settings.archive_path(paths).display());
    println!("Log directory:    {}", settings.log_dir(paths).display());
    println!();
    println!("Seed files:");
    for table in TableName::SEED_ORDER {
        println!("  {:<17} {}", table, settings.seed_file(paths, table).display());
    }
    println!();

    let yaml = serde_yaml::to_string(settings)
        .map_err(|e| TimesheetError::Config(format!("Failed to serialize settings: {}", e)))?;
    println!("Settings:");
    print!("{}", yaml);
    Ok(())
}
