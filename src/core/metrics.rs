//! Per-student metrics: risk classification, domain scores and display values

use crate::core::models::{Field, StudentRecord};
use crate::core::recommend::{recommend, Advisory};
use serde::Serialize;
use std::fmt;

/// AI dependency index above which a student is high risk on its own.
pub const DEFAULT_RISK_THRESHOLD: f64 = 5.5;

/// Placeholder shown in place of an absent value.
pub const MISSING_SENTINEL: &str = "—";

/// Upper bound of the domain score scale. Scores are not clamped to it.
pub const DOMAIN_AXIS_MAX: f64 = 7.0;

/// Binary risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Flagged high risk, or AI index above the threshold
    High,
    /// Neither condition holds
    Low,
}

impl RiskLevel {
    /// Whether this is [`RiskLevel::High`]
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Classify from already-coerced values.
///
/// HIGH when the flag is exactly `1.0` or the AI index is strictly above `threshold`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn classify(high_risk_flag: f64, ai_index: f64, threshold: f64) -> RiskLevel {
    if high_risk_flag == 1.0 || ai_index > threshold {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

/// Classify one record.
#[must_use]
pub fn classify_risk(record: &StudentRecord, threshold: f64) -> RiskLevel {
    classify(
        record.number(Field::HighRiskFlag),
        record.number(Field::AiDependencyIndex),
        threshold,
    )
}

/// A labelled bar series with an optional fixed axis maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    /// Series name
    pub name: String,
    /// Category labels
    pub labels: Vec<String>,
    /// One value per label
    pub values: Vec<f64>,
    /// Fixed axis maximum, if the scale is bounded
    pub axis_max: Option<f64>,
}

/// Reading, writing and numeracy dependency scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainScores {
    /// Reading domain score
    pub reading: f64,
    /// Writing domain score
    pub writing: f64,
    /// Numeracy domain score
    pub numeracy: f64,
}

impl DomainScores {
    /// Coerce the three domain columns of a record
    #[must_use]
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            reading: record.number(Field::ReadingDependencyScore),
            writing: record.number(Field::WritingDependencyScore),
            numeracy: record.number(Field::NumeracyDependencyScore),
        }
    }

    /// Chart series on the fixed 0-7 axis
    #[must_use]
    pub fn series(&self) -> BarSeries {
        BarSeries {
            name: "Dependency Score".to_string(),
            labels: vec![
                "Reading".to_string(),
                "Writing".to_string(),
                "Numeracy".to_string(),
            ],
            values: vec![self.reading, self.writing, self.numeracy],
            axis_max: Some(DOMAIN_AXIS_MAX),
        }
    }

    /// Scores outside `[0, DOMAIN_AXIS_MAX]`, by label
    #[must_use]
    pub fn out_of_range(&self) -> Vec<(&'static str, f64)> {
        [
            ("Reading", self.reading),
            ("Writing", self.writing),
            ("Numeracy", self.numeracy),
        ]
        .into_iter()
        .filter(|(_, v)| !(0.0..=DOMAIN_AXIS_MAX).contains(v))
        .collect()
    }
}

/// Everything shown for one selected student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentMetrics {
    /// Student identifier
    pub student_id: String,
    /// College, verbatim
    pub college: String,
    /// Year level, or `N/A`
    pub year_level: String,
    /// AI dependency index text verbatim, or the missing sentinel
    pub ai_index_display: String,
    /// Coerced AI dependency index
    pub ai_index: f64,
    /// Risk classification
    pub risk: RiskLevel,
    /// Final grade text verbatim, or the missing sentinel
    pub final_grade: String,
    /// Motivation score text verbatim, or the missing sentinel
    pub motivation_display: String,
    /// Coerced motivation score
    pub motivation: f64,
    /// Coerced environment score
    pub environment: f64,
    /// Domain dependency scores
    pub domains: DomainScores,
    /// Advisories for this student
    pub recommendations: Vec<Advisory>,
}

impl StudentMetrics {
    /// Derive metrics for one record using the given risk threshold
    #[must_use]
    pub fn from_record(record: &StudentRecord, threshold: f64) -> Self {
        let ai_index = record.number(Field::AiDependencyIndex);
        let motivation = record.number(Field::MotivationScore);
        let environment = record.number(Field::EnvironmentScore);

        Self {
            student_id: record.student_id().to_string(),
            college: record.college().to_string(),
            year_level: display_or(record.get(Field::YearLevel), "N/A"),
            ai_index_display: display_or(record.get(Field::AiDependencyIndex), MISSING_SENTINEL),
            ai_index,
            risk: classify_risk(record, threshold),
            final_grade: display_or(record.get(Field::FinalGrade), MISSING_SENTINEL),
            motivation_display: display_or(record.get(Field::MotivationScore), MISSING_SENTINEL),
            motivation,
            environment,
            domains: DomainScores::from_record(record),
            recommendations: recommend(ai_index, motivation, environment),
        }
    }
}

/// Label for a student in a selection list: `"<id> — <college>"`
#[must_use]
pub fn option_label(record: &StudentRecord) -> String {
    format!("{} — {}", record.student_id(), record.college())
}

/// Rule-based risk prediction, used when no trained model is available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskPrediction {
    /// Student identifier
    pub student_id: String,
    /// Model probability; always `None` for the rule-based predictor
    pub predicted_risk_prob: Option<f64>,
    /// Whether the AI index alone exceeds the threshold
    pub predicted_risk: bool,
}

/// Predict risk from the AI index alone (the high-risk flag is not consulted).
#[must_use]
pub fn predict_risk(record: &StudentRecord, threshold: f64) -> RiskPrediction {
    RiskPrediction {
        student_id: record.student_id().to_string(),
        predicted_risk_prob: None,
        predicted_risk: record.number(Field::AiDependencyIndex) > threshold,
    }
}

fn display_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}
