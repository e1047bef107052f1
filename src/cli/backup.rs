//! Backup and export CLI commands

use crate::backup::{BackupCoordinator, Exporter};
use crate::config::{Settings, TimesheetPaths};
use crate::display::format_backup_report;
use crate::error::{TimesheetError, TimesheetResult};
use crate::storage::StoreRegistry;

/// Back up every table into the configured backup folder
///
/// Prints the per-table report. Fails when any table could not be backed up,
/// after the remaining tables have been written.
pub fn handle_backup_command(
    paths: &TimesheetPaths,
    settings: &Settings,
    registry: StoreRegistry,
) -> TimesheetResult<()> {
    let folder = settings.backup_dir(paths);
    let coordinator = BackupCoordinator::new(registry);

    println!("Creating backup in {}...", folder.display());
    let report = coordinator.run_backup(settings.backup.rotation, &folder)?;
    println!("{}", format_backup_report(&report));

    let failed: Vec<String> = report.failures().map(|t| t.table.to_string()).collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(TimesheetError::Storage(format!(
            "backup incomplete, failed tables: {}",
            failed.join(", ")
        )))
    }
}

/// Build the export archive and print its location
pub fn handle_export_command(
    paths: &TimesheetPaths,
    settings: &Settings,
    registry: StoreRegistry,
) -> TimesheetResult<()> {
    let exporter = Exporter::from_settings(registry, settings, paths);

    println!("Exporting to {}...", exporter.export_dir().display());
    let archive = exporter.export()?;
    println!("Archive created: {}", archive.display());
    Ok(())
}
