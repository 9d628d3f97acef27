//! Integration tests over the bundled sample survey

use intelli_grade::cohort::{average_grade, group_by_college, CohortStats};
use intelli_grade::config::AnalysisSettings;
use intelli_grade::dashboard::Dashboard;
use intelli_grade::export::{export_dataset_csv, write_dataset};
use intelli_grade::loader::parse_survey_csv;
use intelli_grade::metrics::{RiskLevel, StudentMetrics, MISSING_SENTINEL};
use intelli_grade::recommend::Advisory;
use intelli_grade::report::formats::ReportFormat;
use intelli_grade::report::{ReportContext, ReportGenerator};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/students.csv")
}

fn sample_dashboard() -> Dashboard {
    Dashboard::load(sample_path(), AnalysisSettings::default()).expect("sample should load")
}

#[test]
fn sample_loads_cleanly() {
    let (dataset, report) = parse_survey_csv(sample_path()).expect("sample should load");
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(dataset.len(), 10);
    assert_eq!(dataset.headers().len(), 13);
    assert_eq!(dataset.first().map(|r| r.student_id()), Some("2023-0001"));
}

#[test]
fn cohort_stats_over_sample() {
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");
    let stats = CohortStats::compute(dataset.records(), 5.5);

    assert_eq!(stats.total_students, 10);
    assert_eq!(stats.high_risk_count, 5);
    let avg = average_grade(dataset.records()).expect("non-empty sample");
    assert!((avg - 80.83).abs() < 0.011);

    let groups = group_by_college(dataset.records());
    let names: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "College of Arts and Sciences",
            "College of Business Administration and Accountancy",
            "College of Computer Studies",
            "College of Engineering",
            "College of Hospitality Management and Tourism",
            "College of Nursing",
        ]
    );
    let computing = &groups["College of Computer Studies"];
    assert_eq!(computing.count, 2);
    assert!((computing.average_ai() - 5.75).abs() < 1e-9);
}

#[test]
fn threshold_changes_risk_count() {
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");
    let strict = CohortStats::compute(dataset.records(), 7.0);
    // Only the flagged students remain high risk.
    assert_eq!(strict.high_risk_count, 3);
}

#[test]
fn student_metrics_and_recommendations() {
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");

    let flagged = StudentMetrics::from_record(dataset.get("2023-0002").expect("present"), 5.5);
    assert_eq!(flagged.risk, RiskLevel::High);
    assert_eq!(flagged.ai_index_display, "6.7");
    assert_eq!(
        flagged.recommendations,
        vec![
            Advisory::HighAiReliance,
            Advisory::LowMotivation,
            Advisory::StrongPeerReliance
        ]
    );

    let steady = StudentMetrics::from_record(dataset.get("2023-0003").expect("present"), 5.5);
    assert_eq!(steady.risk, RiskLevel::Low);
    assert_eq!(steady.recommendations, vec![Advisory::NoImmediateConcerns]);
    assert_eq!(steady.year_level, "3");

    assert!(dataset.get("9999-0000").is_err());
}

#[test]
fn dashboard_view_for_selected_student() {
    let mut dashboard = sample_dashboard();
    let empty = dashboard.view();
    assert_eq!(empty.cards.ai_index, MISSING_SENTINEL);
    assert!(empty.cards.risk.is_none());
    assert_eq!(empty.cards.total_responses, 10);

    dashboard.select("2023-0005").expect("present");
    let view = dashboard.view();
    assert_eq!(view.cards.ai_index, "5.6");
    assert_eq!(view.cards.risk, Some(RiskLevel::High));
    assert_eq!(view.college_series.len(), 6);
    assert_eq!(view.options.len(), 10);
    assert_eq!(
        view.domain_series.map(|s| s.values),
        Some(vec![4.4, 4.9, 5.8])
    );
}

#[test]
fn dashboard_reload_tracks_file_changes() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("survey.csv");
    fs::copy(sample_path(), &path).expect("copy sample");

    let mut dashboard =
        Dashboard::load(&path, AnalysisSettings::default()).expect("copy should load");
    dashboard.select("2023-0004").expect("present");

    let content = fs::read_to_string(&path).expect("read copy");
    let trimmed: String = content
        .lines()
        .filter(|line| !line.starts_with("2023-0004"))
        .map(|line| format!("{line}\n"))
        .collect();
    fs::write(&path, trimmed).expect("rewrite copy");

    dashboard.reload().expect("reload");
    assert_eq!(dashboard.dataset().len(), 9);
    assert_eq!(
        dashboard.selected().map(|r| r.student_id()),
        Some("2023-0001")
    );

    fs::remove_file(&path).expect("remove copy");
    assert!(dashboard.reload().is_err());
    assert_eq!(dashboard.dataset().len(), 9);
}

#[test]
fn export_round_trips_through_loader() {
    let temp = TempDir::new().expect("temp dir");
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");

    let out = export_dataset_csv(&dataset, &temp.path().join("exports/all.csv"))
        .expect("export should succeed");
    let (reloaded, report) = parse_survey_csv(&out).expect("export should load");

    assert!(report.is_clean());
    assert_eq!(reloaded.headers(), dataset.headers());
    assert_eq!(reloaded.records(), dataset.records());
}

#[test]
fn export_writer_keeps_header_order() {
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");
    let mut buffer = Vec::new();
    write_dataset(&dataset, &mut buffer).expect("write");

    let text = String::from_utf8(buffer).expect("utf8");
    let header = text.lines().next().expect("header line");
    assert!(header.starts_with("Student_ID,College,Year_Level"));
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn markdown_and_html_reports_written_to_disk() {
    let temp = TempDir::new().expect("temp dir");
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");
    let ctx = ReportContext::new(&dataset, "2023-0002", AnalysisSettings::default())
        .expect("student present");

    for format in [ReportFormat::Markdown, ReportFormat::Html] {
        let path = temp.path().join(ctx.default_file_name(format));
        format
            .reporter()
            .generate(&ctx, &path)
            .expect("report should be written");

        let content = fs::read_to_string(&path).expect("read report");
        assert!(content.contains("2023-0002"));
        assert!(content.contains("College of Computer Studies"));
        assert!(content.contains("HIGH"));
        assert!(content.contains(Advisory::LowMotivation.text()));
    }
}

#[test]
fn report_for_unknown_student_fails() {
    let (dataset, _) = parse_survey_csv(sample_path()).expect("sample should load");
    assert!(ReportContext::new(&dataset, "nobody", AnalysisSettings::default()).is_err());
}
