//! CSV loader for student survey data
//!
//! Parses a header row followed by one row per student. Quoted fields and
//! escaped quotes are handled by the `csv` crate, so commas inside a college
//! name no longer shift the remaining columns.
//!
//! Malformed rows are handled as follows and reported in a [`LoadReport`]:
//! - rows shorter than the header are kept, with the missing cells absent;
//! - rows longer than the header are rejected;
//! - repeated identifiers are kept (lookups return the first one).

use crate::core::coercion::coerce_checked;
use crate::core::error::DatasetError;
use crate::core::models::{Dataset, Field};
use crate::{debug, info};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A problem found while loading; none of these abort the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoadIssue {
    /// An expected column is not in the header; every record reads it as absent.
    MissingColumn(Field),
    /// A row had fewer fields than the header; the rest were left absent.
    ShortRow {
        /// 1-based source line
        line: u64,
        /// Fields present on the row
        found: usize,
        /// Fields in the header
        expected: usize,
    },
    /// A row had more fields than the header and was skipped.
    RejectedRow {
        /// 1-based source line
        line: u64,
        /// Fields present on the row
        found: usize,
        /// Fields in the header
        expected: usize,
    },
    /// An identifier already used by an earlier row.
    DuplicateId {
        /// 1-based source line
        line: u64,
        /// The repeated identifier
        student_id: String,
    },
    /// A numeric cell was absent or empty and will be treated as zero.
    MissingValue {
        /// 1-based source line
        line: u64,
        /// Column affected
        field: Field,
    },
    /// A numeric cell did not parse and will be treated as zero.
    NonNumeric {
        /// 1-based source line
        line: u64,
        /// Column affected
        field: Field,
        /// Raw cell text
        value: String,
    },
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn(field) => write!(f, "column '{field}' is missing"),
            Self::ShortRow {
                line,
                found,
                expected,
            } => write!(
                f,
                "line {line}: {found} of {expected} fields, missing cells left empty"
            ),
            Self::RejectedRow {
                line,
                found,
                expected,
            } => write!(
                f,
                "line {line}: {found} fields but header has {expected}, row skipped"
            ),
            Self::DuplicateId { line, student_id } => {
                write!(f, "line {line}: duplicate student id '{student_id}'")
            }
            Self::MissingValue { line, field } => {
                write!(f, "line {line}: no value for {field}, using 0")
            }
            Self::NonNumeric { line, field, value } => {
                write!(f, "line {line}: '{value}' in {field} is not a number, using 0")
            }
        }
    }
}

/// Everything the loader noticed about the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Issues in the order they were found
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    /// Whether the input was clean
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of rows skipped entirely
    #[must_use]
    pub fn rejected_rows(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, LoadIssue::RejectedRow { .. }))
            .count()
    }

    /// Number of numeric cells that were absent or unparseable
    #[must_use]
    pub fn zero_defaulted_cells(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| {
                matches!(
                    i,
                    LoadIssue::MissingValue { .. } | LoadIssue::NonNumeric { .. }
                )
            })
            .count()
    }
}

/// Parse a survey CSV file
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid CSV, or lacks
/// the `Student_ID`/`College` columns.
pub fn parse_survey_csv<P: AsRef<Path>>(path: P) -> Result<(Dataset, LoadReport), DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_survey_reader(file)?;
    info!(
        "Loaded {} records from {} ({} issues)",
        parsed.0.len(),
        path.display(),
        parsed.1.issues.len()
    );
    Ok(parsed)
}

/// Parse survey CSV text already in memory
///
/// # Errors
/// See [`parse_survey_reader`].
pub fn parse_survey_str(text: &str) -> Result<(Dataset, LoadReport), DatasetError> {
    parse_survey_reader(text.as_bytes())
}

/// Parse survey CSV from any reader
///
/// # Errors
/// Returns an error on malformed CSV (e.g. invalid UTF-8), an empty input, or
/// a header without the required columns.
pub fn parse_survey_reader<R: Read>(reader: R) -> Result<(Dataset, LoadReport), DatasetError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::MissingHeader);
    }

    let mut dataset = Dataset::new(headers)?;
    let mut report = LoadReport::default();
    report.issues.extend(
        dataset
            .schema()
            .missing_expected()
            .into_iter()
            .map(LoadIssue::MissingColumn),
    );

    let expected = dataset.headers().len();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);

        if row.len() > expected {
            report.issues.push(LoadIssue::RejectedRow {
                line,
                found: row.len(),
                expected,
            });
            continue;
        }
        if row.len() < expected {
            report.issues.push(LoadIssue::ShortRow {
                line,
                found: row.len(),
                expected,
            });
        }

        let cells = pad_cells(&row, expected);
        dataset.push_cells(cells);

        if let Some(record) = dataset.records().last() {
            if !seen_ids.insert(record.student_id().to_string()) {
                report.issues.push(LoadIssue::DuplicateId {
                    line,
                    student_id: record.student_id().to_string(),
                });
            }
            for field in Field::ALL
                .into_iter()
                .filter(|f| f.is_numeric() && f.is_expected())
                .filter(|f| dataset.schema().position(*f).is_some())
            {
                let raw = record.get(field);
                if coerce_checked(raw).is_some() {
                    continue;
                }
                match raw.map(str::trim) {
                    Some(text) if !text.is_empty() => report.issues.push(LoadIssue::NonNumeric {
                        line,
                        field,
                        value: text.to_string(),
                    }),
                    _ => report.issues.push(LoadIssue::MissingValue { line, field }),
                }
            }
        }
    }

    debug!(
        "Parsed {} of {} columns as known fields",
        Field::ALL
            .into_iter()
            .filter(|f| dataset.schema().position(*f).is_some())
            .count(),
        expected
    );

    Ok((dataset, report))
}

/// Copy a row's fields, leaving positions past its end absent
fn pad_cells(row: &StringRecord, width: usize) -> Vec<Option<String>> {
    (0..width)
        .map(|idx| row.get(idx).map(str::to_string))
        .collect()
}
