//! Cohort command handler

use super::{load_dashboard, to_json};
use intelli_grade::cohort::{
    average_grade, format_average, group_by_college, CohortStats, CollegeSeries,
};
use intelli_grade::config::Config;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CohortOutput {
    #[serde(flatten)]
    stats: CohortStats,
    average_grade: Option<f64>,
    colleges: CollegeSeries,
}

/// Show cohort totals and per-college counts and averages
pub fn run(data: Option<&Path>, json: bool, config: &Config) -> Result<(), String> {
    let dashboard = load_dashboard(data, config)?;
    let settings = dashboard.settings();
    let records = dashboard.dataset().records();

    let output = CohortOutput {
        stats: CohortStats::compute(records, settings.risk_threshold),
        average_grade: average_grade(records),
        colleges: CollegeSeries::from_groups(&group_by_college(records)),
    };

    if json {
        println!("{}", to_json(&output)?);
        return Ok(());
    }

    let precision = settings.grade_precision;
    println!("\n=== Cohort ===\n");
    println!("Total students:      {}", output.stats.total_students);
    println!(
        "Average grade:       {}",
        format_average(output.average_grade, precision)
    );
    println!(
        "Average AI index:    {}",
        format_average(output.stats.avg_ai_index, precision)
    );
    println!(
        "High risk students:  {} (threshold {})",
        output.stats.high_risk_count, settings.risk_threshold
    );

    if output.colleges.is_empty() {
        return Ok(());
    }
    println!("\n{:<40} {:>6} {:>8}  {:>12}", "College", "Abbr", "Students", "Avg AI Index");
    let colleges = &output.colleges;
    for (((name, abbr), count), avg_ai) in colleges
        .full_labels
        .iter()
        .zip(&colleges.short_labels)
        .zip(&colleges.counts)
        .zip(&colleges.avg_ai)
    {
        println!(
            "{:<40} {abbr:>6} {count:>8}  {avg_ai:>12.2}",
            display_college(name)
        );
    }
    Ok(())
}

fn display_college(name: &str) -> &str {
    if name.is_empty() {
        "(no college)"
    } else {
        name
    }
}
