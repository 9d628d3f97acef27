//! Dashboard context
//!
//! [`Dashboard`] owns the loaded dataset, the analysis settings and the
//! currently selected student. Every render goes through [`Dashboard::view`],
//! which recomputes all cards and series from the dataset.

use crate::core::cohort::{
    average_grade, format_average, group_by_college, CohortStats, CollegeSeries,
};
use crate::core::config::AnalysisSettings;
use crate::core::error::{DatasetError, LookupError};
use crate::core::loader::{parse_survey_csv, LoadReport};
use crate::core::metrics::{option_label, BarSeries, RiskLevel, StudentMetrics, MISSING_SENTINEL};
use crate::core::models::{Dataset, StudentRecord};
use crate::core::recommend::Advisory;
use crate::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The four headline cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    /// Selected student's AI dependency index, verbatim
    pub ai_index: String,
    /// Selected student's risk, `None` with no selection
    pub risk: Option<RiskLevel>,
    /// Cohort average final grade, formatted
    pub average_grade: String,
    /// Number of records in the dataset
    pub total_responses: usize,
}

/// Everything needed to draw the dashboard once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Headline cards
    pub cards: SummaryCards,
    /// Metrics for the selected student
    pub student: Option<StudentMetrics>,
    /// Domain dependency chart for the selected student
    pub domain_series: Option<BarSeries>,
    /// Per-college chart
    pub college_series: CollegeSeries,
    /// Advisories for the selected student; empty with no selection
    pub recommendations: Vec<Advisory>,
    /// Selection list labels in file order
    pub options: Vec<String>,
    /// Cohort totals
    pub cohort: CohortStats,
}

/// Owning context for one loaded dataset
#[derive(Debug, Clone)]
pub struct Dashboard {
    source: Option<PathBuf>,
    dataset: Dataset,
    load_report: LoadReport,
    settings: AnalysisSettings,
    selected: Option<String>,
}

impl Dashboard {
    /// Load a survey file and build a ready context with nothing selected
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P, settings: AnalysisSettings) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let (dataset, load_report) = parse_survey_csv(path)?;
        for issue in &load_report.issues {
            debug!("{}: {}", path.display(), issue);
        }
        Ok(Self {
            source: Some(path.to_path_buf()),
            dataset,
            load_report,
            settings,
            selected: None,
        })
    }

    /// Wrap an already-parsed dataset; [`reload`](Self::reload) is a no-op
    #[must_use]
    pub fn from_dataset(dataset: Dataset, settings: AnalysisSettings) -> Self {
        Self {
            source: None,
            dataset,
            load_report: LoadReport::default(),
            settings,
            selected: None,
        }
    }

    /// The loaded dataset
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Issues found by the last load
    #[must_use]
    pub const fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Active settings
    #[must_use]
    pub const fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// The selected record, if any
    #[must_use]
    pub fn selected(&self) -> Option<&StudentRecord> {
        self.selected
            .as_deref()
            .and_then(|id| self.dataset.find(id))
    }

    /// Select a student by id
    ///
    /// # Errors
    /// Returns [`LookupError::NotFound`] for an unknown id; the previous
    /// selection is kept.
    pub fn select(&mut self, student_id: &str) -> Result<StudentMetrics, LookupError> {
        let record = self.dataset.get(student_id)?;
        let metrics = StudentMetrics::from_record(record, self.settings.risk_threshold);
        self.selected = Some(student_id.to_string());
        self.notify(&metrics);
        Ok(metrics)
    }

    /// Select the first record in file order; `None` for an empty dataset
    pub fn refresh(&mut self) -> Option<StudentMetrics> {
        let first_id = self.dataset.first()?.student_id().to_string();
        self.select(&first_id).ok()
    }

    /// Re-read the source file, keeping the selection when the id still exists
    ///
    /// Falls back to selecting the first record otherwise.
    ///
    /// # Errors
    /// Returns an error if the file can no longer be read or parsed; the
    /// current dataset is kept in that case.
    pub fn reload(&mut self) -> Result<(), DatasetError> {
        let Some(source) = self.source.clone() else {
            return Ok(());
        };
        let (dataset, load_report) = parse_survey_csv(&source)?;
        self.dataset = dataset;
        self.load_report = load_report;

        let keep = self
            .selected
            .as_deref()
            .is_some_and(|id| self.dataset.find(id).is_some());
        if keep {
            info!("Reloaded {}, selection kept", source.display());
        } else {
            self.selected = None;
            self.refresh();
            info!("Reloaded {}", source.display());
        }
        Ok(())
    }

    /// Build the full render model for the current selection
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let records = self.dataset.records();
        let student = self
            .selected()
            .map(|r| StudentMetrics::from_record(r, self.settings.risk_threshold));

        let cards = SummaryCards {
            ai_index: student
                .as_ref()
                .map_or_else(|| MISSING_SENTINEL.to_string(), |m| m.ai_index_display.clone()),
            risk: student.as_ref().map(|m| m.risk),
            average_grade: format_average(average_grade(records), self.settings.grade_precision),
            total_responses: records.len(),
        };

        DashboardView {
            cards,
            domain_series: student.as_ref().map(|m| m.domains.series()),
            recommendations: student
                .as_ref()
                .map(|m| m.recommendations.clone())
                .unwrap_or_default(),
            student,
            college_series: CollegeSeries::from_groups(&group_by_college(records)),
            options: records.iter().map(option_label).collect(),
            cohort: CohortStats::compute(records, self.settings.risk_threshold),
        }
    }

    fn notify(&self, metrics: &StudentMetrics) {
        if self.settings.notify_high_risk && metrics.risk.is_high() {
            warn!(
                "High risk student selected: {} (AI index {})",
                metrics.student_id, metrics.ai_index_display
            );
        }
    }
}
