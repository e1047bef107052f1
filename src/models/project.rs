//! Project model

use serde::{Deserialize, Serialize};

use super::record::{impl_record, RecordId};
use super::TableName;

/// A project consultants report time against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: RecordId,

    pub name: String,

    /// Default rate name for time reported on this project
    #[serde(default)]
    pub rate: String,

    #[serde(default)]
    pub disabled: bool,
}

impl Project {
    pub fn new(name: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            rate: rate.into(),
            disabled: false,
        }
    }
}

impl_record!(Project, TableName::Projects);
