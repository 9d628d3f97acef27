//! Error types for dataset loading, lookup and export

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or parsing a survey dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to open or read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The delimited text could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    /// The input had no header row.
    #[error("Dataset has no header row")]
    MissingHeader,
    /// A column every record depends on is not in the header.
    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(&'static str),
}

/// Failures looking a student up in a loaded dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No record carries this identifier.
    #[error("Student not found: {0}")]
    NotFound(String),
}

/// Failures while writing a dataset back out.
#[derive(Error, Debug)]
pub enum ExportError {
    /// There are no records to export.
    #[error("No data available to export")]
    Empty,
    /// Writing the output failed.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV writer rejected a record.
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}
