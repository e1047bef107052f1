//! Table names
//!
//! The fixed set of tables handled by the backup, export and seed subsystem,
//! together with the order each operation walks them in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimesheetError;

/// One of the tracked entity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Rates,
    Consultants,
    Projects,
    ReportedRecords,
    Holidays,
}

impl TableName {
    /// Order used when seeding every table
    pub const SEED_ORDER: [TableName; 5] = [
        TableName::Rates,
        TableName::Consultants,
        TableName::Projects,
        TableName::ReportedRecords,
        TableName::Holidays,
    ];

    /// Order used when backing up every table
    pub const BACKUP_ORDER: [TableName; 5] = [
        TableName::Rates,
        TableName::Projects,
        TableName::ReportedRecords,
        TableName::Consultants,
        TableName::Holidays,
    ];

    /// Name used in file names, logs and CLI arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rates => "rates",
            Self::Consultants => "consultants",
            Self::Projects => "projects",
            Self::ReportedRecords => "reported_records",
            Self::Holidays => "holidays",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::SEED_ORDER
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| TimesheetError::Validation(format!("unknown table: {}", s)))
    }
}
