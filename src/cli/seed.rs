//! Seed CLI commands

use crate::display::format_seed_report;
use crate::error::TimesheetResult;
use crate::seed::{SeedCoordinator, SeedTarget};
use crate::storage::StoreRegistry;

/// Seed one table, or every table with `all`
///
/// Without `force`, tables that already hold rows are skipped.
pub fn handle_seed_command(
    registry: StoreRegistry,
    target: &str,
    force: bool,
) -> TimesheetResult<()> {
    let target: SeedTarget = target.parse()?;
    let seeder = SeedCoordinator::new(registry);

    let report = seeder.seed(target, force)?;
    println!("{}", format_seed_report(&report));
    Ok(())
}

/// Seed every empty table
pub fn handle_check_command(registry: StoreRegistry) -> TimesheetResult<()> {
    let report = SeedCoordinator::new(registry).seed_all();
    println!("{}", format_seed_report(&report));

    if report.seeded().next().is_none() {
        println!("All tables already hold data.");
    }
    Ok(())
}
