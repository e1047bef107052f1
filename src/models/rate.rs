//! Rate model
//!
//! A rate classifies reported hours, e.g. "Regular" or "Vacation".

use serde::{Deserialize, Serialize};

use super::record::{impl_record, RecordId};
use super::TableName;

/// A billing or absence rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default)]
    pub id: RecordId,

    /// Rate name as referenced by projects and reported records
    pub name: String,

    /// Whether hours under this rate count as working time
    #[serde(default)]
    pub rate_type: String,

    #[serde(default)]
    pub disabled: bool,
}

impl Rate {
    pub fn new(name: impl Into<String>, rate_type: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            rate_type: rate_type.into(),
            disabled: false,
        }
    }
}

impl_record!(Rate, TableName::Rates);
