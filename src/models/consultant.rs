//! Consultant model

use serde::{Deserialize, Serialize};

use super::record::{impl_record, RecordId};
use super::TableName;

/// A consultant reporting time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultant {
    #[serde(default)]
    pub id: RecordId,

    pub name: String,

    /// Share of a full-time position (1.0 = full time)
    #[serde(default = "default_allocation")]
    pub allocation: f64,

    #[serde(default)]
    pub disabled: bool,
}

fn default_allocation() -> f64 {
    1.0
}

impl Consultant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            allocation: default_allocation(),
            disabled: false,
        }
    }
}

impl_record!(Consultant, TableName::Consultants);
