//! Data models for `IntelliGrade`

pub mod dataset;
pub mod field;
pub mod record;

pub use dataset::Dataset;
pub use field::{Field, Schema};
pub use record::StudentRecord;
