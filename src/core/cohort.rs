//! Cohort-wide aggregation: average grade, summary stats and per-college groups

use crate::core::coercion::round_to;
use crate::core::metrics::MISSING_SENTINEL;
use crate::core::models::{Field, StudentRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-college accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupStat {
    /// Students in the group
    pub count: usize,
    /// Sum of coerced AI dependency index over the group
    pub ai_sum: f64,
}

impl GroupStat {
    /// Mean AI dependency index over the group's members
    ///
    /// `0.0` for an empty group or when the sum overflowed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_ai(&self) -> f64 {
        if self.count == 0 || !self.ai_sum.is_finite() {
            0.0
        } else {
            self.ai_sum / self.count as f64
        }
    }
}

/// Groups keyed by literal college text, iterated in lexicographic order
pub type CollegeGroups = BTreeMap<String, GroupStat>;

/// Mean of a coerced column
///
/// `None` for an empty slice, and also when the sum overflows to infinity.
#[allow(clippy::cast_precision_loss)]
fn mean_of(records: &[StudentRecord], field: Field) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.number(field)).sum();
    Some(total / records.len() as f64).filter(|mean| mean.is_finite())
}

/// Average final grade rounded to two decimal places, `None` when there are no records
#[must_use]
pub fn average_grade(records: &[StudentRecord]) -> Option<f64> {
    mean_of(records, Field::FinalGrade).map(|avg| round_to(avg, 2))
}

/// Format an optional average with `precision` decimals, or the missing sentinel
#[must_use]
pub fn format_average(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(
        || MISSING_SENTINEL.to_string(),
        |avg| format!("{avg:.precision$}"),
    )
}

/// Bucket records by college and accumulate count and AI index sum.
///
/// College text is used as-is: `"A"` and `"A "` are different groups. A
/// record without a college cell is grouped under the empty string.
#[must_use]
pub fn group_by_college(records: &[StudentRecord]) -> CollegeGroups {
    let mut groups = CollegeGroups::new();
    for record in records {
        let entry = groups.entry(record.college().to_string()).or_default();
        entry.count += 1;
        entry.ai_sum += record.number(Field::AiDependencyIndex);
    }
    groups
}

/// Headline numbers for the whole cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortStats {
    /// Number of records
    pub total_students: usize,
    /// Mean AI dependency index, unrounded
    pub avg_ai_index: Option<f64>,
    /// Mean final grade, unrounded
    pub avg_final_grade: Option<f64>,
    /// Students classified high risk at the given threshold
    pub high_risk_count: usize,
}

impl CohortStats {
    /// Compute cohort stats with the given risk threshold
    #[must_use]
    pub fn compute(records: &[StudentRecord], threshold: f64) -> Self {
        Self {
            total_students: records.len(),
            avg_ai_index: mean_of(records, Field::AiDependencyIndex),
            avg_final_grade: mean_of(records, Field::FinalGrade),
            high_risk_count: records
                .iter()
                .filter(|r| crate::core::metrics::classify_risk(r, threshold).is_high())
                .count(),
        }
    }
}

/// Chart-ready per-college series, aligned by index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollegeSeries {
    /// College names, sorted
    pub full_labels: Vec<String>,
    /// Abbreviated axis labels
    pub short_labels: Vec<String>,
    /// Students per college
    pub counts: Vec<usize>,
    /// Mean AI dependency index per college
    pub avg_ai: Vec<f64>,
}

impl CollegeSeries {
    /// Build aligned series from grouped stats
    #[must_use]
    pub fn from_groups(groups: &CollegeGroups) -> Self {
        Self {
            full_labels: groups.keys().cloned().collect(),
            short_labels: groups.keys().map(|name| abbreviate_college(name)).collect(),
            counts: groups.values().map(|g| g.count).collect(),
            avg_ai: groups.values().map(GroupStat::average_ai).collect(),
        }
    }

    /// Number of colleges
    #[must_use]
    pub fn len(&self) -> usize {
        self.full_labels.len()
    }

    /// Whether there are no colleges
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_labels.is_empty()
    }
}

/// Short axis label for a college name.
///
/// `"College of "` is stripped first. A single remaining word keeps its first
/// four characters; several words become their initials, at most three.
#[must_use]
pub fn abbreviate_college(name: &str) -> String {
    let stripped = name.replacen("College of ", "", 1);
    let words: Vec<&str> = stripped.split(' ').collect();
    if words.len() == 1 {
        return words[0].chars().take(4).collect();
    }
    words
        .iter()
        .filter_map(|w| w.chars().next())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_survey_str;
    use crate::core::models::Dataset;

    fn dataset(rows: &[&str]) -> Dataset {
        let text = format!(
            "Student_ID,College,Final_Grade,AI_Dependency_Index,High_Risk_Flag\n{}\n",
            rows.join("\n")
        );
        parse_survey_str(&text).expect("parse").0
    }

    #[test]
    fn average_of_single_record() {
        let ds = dataset(&["S1,A,80,1,0"]);
        assert_eq!(format_average(average_grade(ds.records()), 2), "80.00");
    }

    #[test]
    fn average_of_two_records() {
        let ds = dataset(&["S1,A,70,1,0", "S2,B,90,1,0"]);
        assert_eq!(average_grade(ds.records()), Some(80.0));
        assert_eq!(format_average(average_grade(ds.records()), 2), "80.00");
    }

    #[test]
    fn average_rounds_to_two_places() {
        let ds = dataset(&["S1,A,70,1,0", "S2,A,71,1,0", "S3,A,71,1,0"]);
        assert_eq!(average_grade(ds.records()), Some(70.67));
    }

    #[test]
    fn non_numeric_grades_count_as_zero() {
        let ds = dataset(&["S1,A,100,1,0", "S2,A,,1,0"]);
        assert_eq!(average_grade(ds.records()), Some(50.0));
    }

    #[test]
    fn overflowing_sum_has_no_average() {
        let ds = dataset(&["S1,A,1e308,1e308,0", "S2,A,1e308,1e308,0"]);
        assert_eq!(average_grade(ds.records()), None);
        assert_eq!(format_average(average_grade(ds.records()), 2), MISSING_SENTINEL);
        let stats = CohortStats::compute(ds.records(), 5.5);
        assert_eq!(stats.avg_final_grade, None);
        assert_eq!(stats.avg_ai_index, None);
        assert_eq!(group_by_college(ds.records())["A"].average_ai(), 0.0);
    }

    #[test]
    fn huge_finite_average_survives_rounding() {
        let ds = dataset(&["S1,A,1e308,1,0"]);
        assert_eq!(average_grade(ds.records()), Some(1e308));
    }

    #[test]
    fn empty_dataset_has_no_average() {
        let ds = dataset(&[]);
        assert!(ds.is_empty());
        assert_eq!(average_grade(ds.records()), None);
        assert_eq!(format_average(None, 2), MISSING_SENTINEL);
        let stats = CohortStats::compute(ds.records(), 5.5);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.avg_final_grade, None);
        assert_eq!(stats.avg_ai_index, None);
    }

    #[test]
    fn groups_count_members_per_college() {
        let ds = dataset(&["S1,A,80,2,0", "S2,A,80,4,0", "S3,B,80,9,0"]);
        let groups = group_by_college(ds.records());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["A"].count, 2);
        assert_eq!(groups["B"].count, 1);
        assert_eq!(groups["A"].average_ai(), 3.0);
        assert_eq!(groups["B"].average_ai(), 9.0);
    }

    #[test]
    fn groups_are_sorted_and_not_normalized() {
        let ds = dataset(&["S1,b,80,1,0", "S2,A ,80,1,0", "S3,A,80,1,0", "S4,B,80,1,0"]);
        let names: Vec<_> = group_by_college(ds.records()).into_keys().collect();
        assert_eq!(names, vec!["A", "A ", "B", "b"]);
    }

    #[test]
    fn cohort_stats_match_records() {
        let ds = dataset(&["S1,A,70,2,1", "S2,B,90,6,0", "S3,B,80,1,0"]);
        let stats = CohortStats::compute(ds.records(), 5.5);
        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.avg_final_grade, Some(80.0));
        assert_eq!(stats.avg_ai_index, Some(3.0));
        assert_eq!(stats.high_risk_count, 2);
    }

    #[test]
    fn college_series_aligns_columns() {
        let ds = dataset(&[
            "S1,College of Nursing,80,2,0",
            "S2,College of Computer Studies,80,4,0",
            "S3,College of Computer Studies,80,6,0",
        ]);
        let series = CollegeSeries::from_groups(&group_by_college(ds.records()));
        assert_eq!(
            series.full_labels,
            vec!["College of Computer Studies", "College of Nursing"]
        );
        assert_eq!(series.short_labels, vec!["CCS", "Nurs"]);
        assert_eq!(series.counts, vec![2, 1]);
        assert_eq!(series.avg_ai, vec![5.0, 2.0]);
    }

    #[test]
    fn abbreviations_follow_word_count() {
        assert_eq!(abbreviate_college("College of Engineering"), "Engi");
        assert_eq!(abbreviate_college("College of Arts and Sciences"), "AaS");
        assert_eq!(
            abbreviate_college("College of Hospitality Management and Tourism"),
            "HMa"
        );
        assert_eq!(abbreviate_college("Law"), "Law");
        assert_eq!(abbreviate_college(""), "");
    }
}
