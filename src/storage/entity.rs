//! The per-table storage capability used by backups and seeding

use std::path::Path;

use crate::error::TimesheetResult;

/// Count, seed and dump operations of one table
///
/// The backup, export and seed coordinators depend only on this trait; the
/// schema and persistence of the table belong to the implementation.
pub trait EntityStore: Send + Sync {
    /// Current number of rows
    fn count(&self) -> TimesheetResult<usize>;

    /// Bulk-load rows from the CSV file at `path`, returning the rows loaded
    fn seed_from_file(&self, path: &Path) -> TimesheetResult<usize>;

    /// Dump all rows as CSV to `path`, returning the rows written
    fn backup_to_file(&self, path: &Path) -> TimesheetResult<usize>;

    /// Remove every row
    fn clear(&self) -> TimesheetResult<()>;
}
