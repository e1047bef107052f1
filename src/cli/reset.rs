//! Reset CLI command

use tracing::warn;

use crate::error::TimesheetResult;
use crate::models::TableName;
use crate::storage::StoreRegistry;

/// Remove every row of every table
///
/// Refuses to run unless `force` is given.
pub fn handle_reset_command(registry: &StoreRegistry, force: bool) -> TimesheetResult<()> {
    if !force {
        println!("This will delete all rows of every table.");
        println!("Re-run with --force to confirm.");
        return Ok(());
    }

    for table in TableName::SEED_ORDER {
        registry.store(table)?.clear()?;
        warn!("table {} cleared", table);
        println!("Cleared {}", table);
    }
    println!("Reset complete.");
    Ok(())
}
