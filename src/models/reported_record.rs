//! Reported record model
//!
//! One entry of reported time: a consultant's hours on a project for a day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{impl_record, RecordId};
use super::TableName;

/// Hours reported by a consultant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedRecord {
    #[serde(default)]
    pub id: RecordId,

    /// Day the hours were worked (YYYY-MM-DD)
    pub date: NaiveDate,

    pub hours: f64,

    pub project: String,

    #[serde(default)]
    pub description: String,

    pub rate: String,

    pub consultant: String,
}

impl_record!(ReportedRecord, TableName::ReportedRecords);
