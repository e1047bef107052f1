//! Core data models for the timesheet service
//!
//! This module contains the table names and the row types of the five
//! tracked tables: rates, consultants, projects, reported records and holidays.

pub mod consultant;
pub mod holiday;
pub mod project;
pub mod rate;
pub mod record;
pub mod reported_record;
pub mod table;

pub use consultant::Consultant;
pub use holiday::Holiday;
pub use project::Project;
pub use rate::Rate;
pub use record::{Record, RecordId};
pub use reported_record::ReportedRecord;
pub use table::TableName;
