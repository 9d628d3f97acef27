//! Ordered collection of student records

use super::field::Schema;
use super::record::StudentRecord;
use crate::core::error::{DatasetError, LookupError};
use std::sync::Arc;

/// The full survey: header row plus records in file order.
///
/// A dataset is assembled by the loader and has no public mutating API, so
/// every aggregation sees the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    schema: Arc<Schema>,
    records: Vec<StudentRecord>,
}

impl Dataset {
    /// Create an empty dataset for the given header row
    ///
    /// # Errors
    /// Returns an error if a required column is missing.
    pub fn new(headers: Vec<String>) -> Result<Self, DatasetError> {
        let schema = Arc::new(Schema::from_headers(headers.as_slice())?);
        Ok(Self {
            headers,
            schema,
            records: Vec::new(),
        })
    }

    /// Append a row whose cells follow the header order
    pub(crate) fn push_cells(&mut self, cells: Vec<Option<String>>) {
        self.records
            .push(StudentRecord::new(Arc::clone(&self.schema), cells));
    }

    /// Header names in file order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Resolved column positions
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All records in file order
    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record in file order
    #[must_use]
    pub fn first(&self) -> Option<&StudentRecord> {
        self.records.first()
    }

    /// Find the first record with this identifier
    #[must_use]
    pub fn find(&self, student_id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.student_id() == student_id)
    }

    /// Look up a student, failing with `NotFound` for unknown identifiers
    ///
    /// # Errors
    /// Returns `LookupError::NotFound` when no record has this identifier.
    pub fn get(&self, student_id: &str) -> Result<&StudentRecord, LookupError> {
        self.find(student_id)
            .ok_or_else(|| LookupError::NotFound(student_id.to_string()))
    }
}
