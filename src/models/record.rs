//! Common behavior of table rows
//!
//! Every row type is read from seed CSV files, kept in a JSON table file and
//! written back out as CSV by backups. Rows carry a sequential numeric id that
//! the store assigns when they are loaded.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::TableName;

/// Numeric row identifier, unique within one table
pub type RecordId = u64;

/// A row of one of the tracked tables
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table this row type belongs to
    const TABLE: TableName;

    /// Row identifier
    fn id(&self) -> RecordId;

    /// Replace the row identifier
    fn set_id(&mut self, id: RecordId);
}

/// Implements [`Record`] for a struct with a `pub id: RecordId` field
macro_rules! impl_record {
    ($ty:ty, $table:expr) => {
        impl $crate::models::record::Record for $ty {
            const TABLE: $crate::models::TableName = $table;

            fn id(&self) -> $crate::models::record::RecordId {
                self.id
            }

            fn set_id(&mut self, id: $crate::models::record::RecordId) {
                self.id = id;
            }
        }
    };
}

pub(crate) use impl_record;
