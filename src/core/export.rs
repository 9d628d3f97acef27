//! Dataset export back to CSV

use crate::core::error::ExportError;
use crate::core::models::Dataset;
use crate::info;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default export file name, `IntelliGrade_AllData_<unix-millis>.csv`
#[must_use]
pub fn default_export_name() -> String {
    format!(
        "IntelliGrade_AllData_{}.csv",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Write the header and every record in header order.
///
/// Absent cells become empty fields; fields are quoted only when they need it.
///
/// # Errors
/// Returns [`ExportError::Empty`] when there are no records, or a write error.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<(), ExportError> {
    if dataset.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(dataset.headers())?;
    for record in dataset.records() {
        csv_writer.write_record(record.cells().iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export the dataset to `path`, creating parent directories
///
/// # Errors
/// See [`write_dataset`].
pub fn export_dataset_csv(dataset: &Dataset, path: &Path) -> Result<PathBuf, ExportError> {
    if dataset.is_empty() {
        return Err(ExportError::Empty);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_dataset(dataset, File::create(path)?)?;
    info!("Exported {} records to {}", dataset.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_survey_str;
    use tempfile::TempDir;

    fn export_to_string(dataset: &Dataset) -> String {
        let mut buffer = Vec::new();
        write_dataset(dataset, &mut buffer).expect("export");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn unquoted_file_is_reproduced() {
        let text = "Student_ID,College,Final_Grade,Notes\nS1,College of Nursing,80,ok\nS2,College of Arts,,\n";
        let (dataset, _) = parse_survey_str(text).expect("parse");
        assert_eq!(export_to_string(&dataset), text);
    }

    #[test]
    fn embedded_commas_are_quoted() {
        let text = "Student_ID,College\nS1,\"Arts, Sciences\"\n";
        let (dataset, _) = parse_survey_str(text).expect("parse");
        assert_eq!(export_to_string(&dataset), text);
    }

    #[test]
    fn short_rows_export_empty_cells() {
        let (dataset, _) = parse_survey_str("Student_ID,College,Final_Grade\nS1\n").expect("parse");
        assert_eq!(export_to_string(&dataset), "Student_ID,College,Final_Grade\nS1,,\n");
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let (dataset, _) = parse_survey_str("Student_ID,College\n").expect("parse");
        let err = write_dataset(&dataset, Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "No data available to export");
    }

    #[test]
    fn writes_file_into_new_directory() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("exports").join(default_export_name());
        let (dataset, _) = parse_survey_str("Student_ID,College\nS1,A\n").expect("parse");
        let written = export_dataset_csv(&dataset, &path).expect("export");
        assert_eq!(
            fs::read_to_string(written).expect("read"),
            "Student_ID,College\nS1,A\n"
        );
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("IntelliGrade_AllData_")));
    }
}
