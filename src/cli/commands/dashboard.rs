//! Dashboard command handler
//!
//! Renders the dashboard view as text: headline cards, the selected student's
//! domain chart and recommendations, and the per-college chart.

use super::{load_dashboard, to_json};
use intelli_grade::config::Config;
use intelli_grade::dashboard::{Dashboard, DashboardView};
use intelli_grade::metrics::{BarSeries, MISSING_SENTINEL};
use intelli_grade::{info, warn};
use std::fmt::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Width of a full text bar, in characters
const BAR_WIDTH: usize = 28;

/// Options for one dashboard run
pub struct DashboardArgs<'a> {
    /// Survey file override
    pub data: Option<&'a Path>,
    /// Student to select; first record when `None`
    pub student: Option<&'a str>,
    /// Keep reloading the file
    pub watch: bool,
    /// Stop after this many reloads
    pub iterations: Option<u32>,
    /// JSON output
    pub json: bool,
}

/// Render the dashboard, optionally reloading on the configured interval
pub fn run(args: &DashboardArgs, config: &Config) -> Result<(), String> {
    let mut dashboard = load_dashboard(args.data, config)?;

    match args.student {
        Some(id) => {
            dashboard.select(id).map_err(|e| format!("✗ {e}"))?;
        }
        None => {
            if dashboard.refresh().is_none() {
                info!("Dataset is empty, showing cohort view only");
            }
        }
    }
    print_view(&dashboard, args.json)?;

    let watch = args.watch || config.dashboard.auto_refresh;
    if !watch {
        return Ok(());
    }

    let interval = Duration::from_secs(dashboard.settings().refresh_interval.max(1));
    let mut reloads = 0_u32;
    while args.iterations.map_or(true, |limit| reloads < limit) {
        thread::sleep(interval);
        reloads += 1;
        if let Err(e) = dashboard.reload() {
            warn!("Reload failed, keeping previous data: {e}");
            continue;
        }
        print_view(&dashboard, args.json)?;
    }
    Ok(())
}

fn print_view(dashboard: &Dashboard, json: bool) -> Result<(), String> {
    let view = dashboard.view();
    if json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_text(&view));
    }
    Ok(())
}

/// Text rendering of a dashboard view
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    let risk = view
        .cards
        .risk
        .map_or_else(|| MISSING_SENTINEL.to_string(), |r| r.to_string());

    out.push_str("\n=== IntelliGrade Dashboard ===\n\n");
    if let Some(student) = &view.student {
        let _ = writeln!(
            out,
            "Student:          {} — {}",
            student.student_id, student.college
        );
    }
    let _ = writeln!(out, "AI Index:         {}", view.cards.ai_index);
    let _ = writeln!(out, "Risk Level:       {risk}");
    let _ = writeln!(out, "Average Grade:    {}", view.cards.average_grade);
    let _ = writeln!(out, "Total Responses:  {}", view.cards.total_responses);

    if let Some(series) = &view.domain_series {
        out.push_str("\nDependency Domain Scores (0-7)\n");
        out.push_str(&render_bars(series));
    }

    if !view.recommendations.is_empty() {
        out.push_str("\nRecommendations\n");
        for advisory in &view.recommendations {
            let _ = writeln!(out, "  • {advisory}");
        }
    }

    if !view.college_series.is_empty() {
        let colleges = BarSeries {
            name: "Avg AI Index".to_string(),
            labels: view
                .college_series
                .short_labels
                .iter()
                .zip(&view.college_series.counts)
                .map(|(label, count)| format!("{label} ({count})"))
                .collect(),
            values: view.college_series.avg_ai.clone(),
            axis_max: None,
        };
        out.push_str("\nAverage AI Index by College (students)\n");
        out.push_str(&render_bars(&colleges));
    }
    out
}

/// One line per value, bars scaled to the axis maximum or the largest value
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn render_bars(series: &BarSeries) -> String {
    let max = series
        .axis_max
        .unwrap_or_else(|| series.values.iter().copied().fold(0.0, f64::max));
    let label_width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in series.labels.iter().zip(&series.values) {
        let filled = if max > 0.0 {
            ((value / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {label:<label_width$}  {}{} {value:.2}",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelli_grade::config::AnalysisSettings;
    use intelli_grade::loader::parse_survey_str;

    fn dashboard() -> Dashboard {
        let (dataset, _) = parse_survey_str(
            "Student_ID,College,Final_Grade,AI_Dependency_Index,Reading_Dependency_Score\nS1,College of Nursing,80,3.5,7\nS2,College of Arts,90,7,0\n",
        )
        .expect("parse");
        Dashboard::from_dataset(dataset, AnalysisSettings::default())
    }

    #[test]
    fn text_view_shows_cards_and_charts() {
        let mut dash = dashboard();
        dash.refresh();
        let text = render_text(&dash.view());
        assert!(text.contains("S1 — College of Nursing"));
        assert!(text.contains("AI Index:         3.5"));
        assert!(text.contains("Average Grade:    85.00"));
        assert!(text.contains("Nurs (1)"));
        assert!(text.contains(&format!("Reading   {} 7.00", "█".repeat(BAR_WIDTH))));
    }

    #[test]
    fn cohort_only_view_has_no_student_sections() {
        let text = render_text(&dashboard().view());
        assert!(text.contains("Risk Level:       —"));
        assert!(!text.contains("Recommendations"));
        assert!(text.contains("Average AI Index by College"));
    }

    #[test]
    fn bars_scale_to_largest_value_without_axis() {
        let series = BarSeries {
            name: "x".to_string(),
            labels: vec!["a".to_string(), "b".to_string()],
            values: vec![2.0, 4.0],
            axis_max: None,
        };
        let text = render_bars(&series);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
    }
}
