//! Holiday model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{impl_record, RecordId};
use super::TableName;

/// A public holiday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(default)]
    pub id: RecordId,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            date,
            description: description.into(),
        }
    }
}

impl_record!(Holiday, TableName::Holidays);
