//! Report generation module for per-student survey reports
//!
//! A report covers one student's information, key metrics, dependency domain
//! scores and recommendations, followed by a college-wide analysis of the
//! whole cohort. Markdown, HTML and PDF outputs are supported.

pub mod formats;
pub mod visualization;

use crate::core::cohort::{
    abbreviate_college, average_grade, format_average, group_by_college, CohortStats,
    CollegeGroups, CollegeSeries,
};
use crate::core::config::AnalysisSettings;
use crate::core::error::LookupError;
use crate::core::metrics::StudentMetrics;
use crate::core::models::Dataset;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, PdfReporter, ReportFormat};
pub use visualization::MermaidGenerator;

/// Report title
pub const REPORT_TITLE: &str = "IntelliGrade Report";
/// Institution line under the title
pub const INSTITUTION: &str = "Laguna State Polytechnic University - San Pablo City Campus";
/// Footer line
pub const FOOTER: &str = "IntelliGrade • All Rights Reserved • DevCo-BLV (2025)";

/// One row of the college-wide analysis table
#[derive(Debug, Clone, PartialEq)]
pub struct CollegeRow {
    /// College name, verbatim
    pub name: String,
    /// Abbreviated label
    pub short_label: String,
    /// Students in the college
    pub count: usize,
    /// Mean AI dependency index
    pub avg_ai: f64,
}

/// Data context for report generation
///
/// Everything a template needs, computed once from the dataset.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Metrics for the reported student
    pub student: StudentMetrics,
    /// Cohort totals
    pub cohort: CohortStats,
    /// Per-college groups
    pub groups: CollegeGroups,
    /// Rounded cohort average grade
    pub average_grade: Option<f64>,
    /// Settings the report was produced with
    pub settings: AnalysisSettings,
    /// Local generation time, preformatted
    pub generated_at: String,
}

impl ReportContext {
    /// Build the context for one student
    ///
    /// # Errors
    /// Returns [`LookupError::NotFound`] if the id is not in the dataset.
    pub fn new(
        dataset: &Dataset,
        student_id: &str,
        settings: AnalysisSettings,
    ) -> Result<Self, LookupError> {
        let record = dataset.get(student_id)?;
        let records = dataset.records();
        Ok(Self {
            student: StudentMetrics::from_record(record, settings.risk_threshold),
            cohort: CohortStats::compute(records, settings.risk_threshold),
            groups: group_by_college(records),
            average_grade: average_grade(records),
            settings,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Cohort average grade at the configured precision, or the sentinel
    #[must_use]
    pub fn average_grade_display(&self) -> String {
        format_average(self.average_grade, self.settings.grade_precision)
    }

    /// College table rows, sorted by name
    #[must_use]
    pub fn college_rows(&self) -> Vec<CollegeRow> {
        self.groups
            .iter()
            .map(|(name, stat)| CollegeRow {
                name: name.clone(),
                short_label: abbreviate_college(name),
                count: stat.count,
                avg_ai: stat.average_ai(),
            })
            .collect()
    }

    /// Per-college chart series
    #[must_use]
    pub fn college_series(&self) -> CollegeSeries {
        CollegeSeries::from_groups(&self.groups)
    }

    /// Whether chart sections are rendered
    #[must_use]
    pub const fn include_charts(&self) -> bool {
        self.settings.include_charts
    }

    /// Student id with path separators replaced, for use in file names
    #[must_use]
    pub fn file_safe_id(&self) -> String {
        self.student.student_id.replace(['/', '\\'], "_")
    }

    /// Default output file name, `IntelliGrade_Report_<id>_<unix-millis>.<ext>`
    ///
    /// Path separators in the id become `_`.
    #[must_use]
    pub fn default_file_name(&self, format: ReportFormat) -> String {
        format!(
            "IntelliGrade_Report_{}_{}.{}",
            self.file_safe_id(),
            chrono::Utc::now().timestamp_millis(),
            format.extension()
        )
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_survey_str;

    fn dataset() -> Dataset {
        parse_survey_str(
            "Student_ID,College,Final_Grade,AI_Dependency_Index\nS1,College of Nursing,70,2\nS2,College of Arts and Sciences,91,4\nS3,College of Nursing,80,6\n",
        )
        .expect("parse")
        .0
    }

    #[test]
    fn context_collects_cohort_data() {
        let ctx = ReportContext::new(&dataset(), "S2", AnalysisSettings::default()).expect("ctx");
        assert_eq!(ctx.student.college, "College of Arts and Sciences");
        assert_eq!(ctx.cohort.total_students, 3);
        assert_eq!(ctx.average_grade_display(), "80.33");

        let rows = ctx.college_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].short_label, "AaS");
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].avg_ai, 4.0);
    }

    #[test]
    fn unknown_student_has_no_context() {
        assert!(ReportContext::new(&dataset(), "S9", AnalysisSettings::default()).is_err());
    }

    #[test]
    fn default_file_name_carries_id_and_extension() {
        let ctx = ReportContext::new(&dataset(), "S1", AnalysisSettings::default()).expect("ctx");
        let name = ctx.default_file_name(ReportFormat::Pdf);
        assert!(name.starts_with("IntelliGrade_Report_S1_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn default_file_name_replaces_path_separators() {
        let (dataset, _) =
            parse_survey_str("Student_ID,College\nA/1,College of Law\nB\\2,College of Law\n")
                .expect("parse");
        let dir = tempfile::TempDir::new().expect("temp dir");

        for id in ["A/1", "B\\2"] {
            let ctx = ReportContext::new(&dataset, id, AnalysisSettings::default()).expect("ctx");
            let name = ctx.default_file_name(ReportFormat::Markdown);
            assert!(!name.contains('/') && !name.contains('\\'), "{name}");

            let path = dir.path().join(&name);
            ReportFormat::Markdown
                .reporter()
                .generate(&ctx, &path)
                .expect("report written next to the others");
            assert_eq!(path.parent(), Some(dir.path()));
            assert!(path.exists());
        }
    }
}
