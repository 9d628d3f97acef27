//! Student survey record

use super::field::{Field, Schema};
use crate::core::coercion::coerce;
use std::sync::Arc;

/// One student's row.
///
/// Each cell is either present text (possibly empty) or absent, which happens
/// when the source row was shorter than the header. Recognized columns are
/// reached through [`Field`]; all cells are kept in header order for export.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    schema: Arc<Schema>,
    cells: Vec<Option<String>>,
}

impl StudentRecord {
    /// Create a record from cells laid out according to `schema`
    #[must_use]
    pub const fn new(schema: Arc<Schema>, cells: Vec<Option<String>>) -> Self {
        Self { schema, cells }
    }

    /// Raw text of a recognized field, `None` when the column or the cell is absent
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.schema
            .position(field)
            .and_then(|idx| self.cells.get(idx))
            .and_then(Option::as_deref)
    }

    /// Coerced numeric value of a field (zero when absent or non-numeric)
    #[must_use]
    pub fn number(&self, field: Field) -> f64 {
        coerce(self.get(field))
    }

    /// Student identifier, empty when the cell is absent
    #[must_use]
    pub fn student_id(&self) -> &str {
        self.get(Field::StudentId).unwrap_or_default()
    }

    /// College name exactly as written, empty when the cell is absent
    #[must_use]
    pub fn college(&self) -> &str {
        self.get(Field::College).unwrap_or_default()
    }

    /// All cells in header order
    #[must_use]
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }
}
