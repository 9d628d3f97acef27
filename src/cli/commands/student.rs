//! Student command handler

use super::{load_dashboard, to_json};
use intelli_grade::config::Config;
use intelli_grade::metrics::{predict_risk, RiskPrediction, StudentMetrics};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StudentOutput {
    #[serde(flatten)]
    metrics: StudentMetrics,
    prediction: RiskPrediction,
}

/// Show one student's metrics, domain scores and recommendations
pub fn run(id: &str, data: Option<&Path>, json: bool, config: &Config) -> Result<(), String> {
    let mut dashboard = load_dashboard(data, config)?;
    let metrics = dashboard.select(id).map_err(|e| format!("✗ {e}"))?;

    if json {
        let threshold = dashboard.settings().risk_threshold;
        let prediction = dashboard
            .selected()
            .map(|record| predict_risk(record, threshold))
            .ok_or_else(|| format!("✗ Student not found: {id}"))?;
        println!("{}", to_json(&StudentOutput { metrics, prediction })?);
        return Ok(());
    }

    print_metrics(&metrics);
    Ok(())
}

fn print_metrics(m: &StudentMetrics) {
    println!("\n=== Student {} ===\n", m.student_id);
    println!("College:             {}", m.college);
    println!("Year Level:          {}", m.year_level);
    println!("AI Dependency Index: {}", m.ai_index_display);
    println!("Risk Level:          {}", m.risk);
    println!("Final Grade:         {}", m.final_grade);
    println!("Motivation Score:    {}", m.motivation_display);

    println!("\nDependency Domain Scores:");
    let series = m.domains.series();
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("  {label:<9} {value}");
    }
    for (label, value) in m.domains.out_of_range() {
        println!("  ⚠️  {label} score {value} is outside 0-7");
    }

    println!("\nRecommendations:");
    for (idx, advisory) in m.recommendations.iter().enumerate() {
        println!("  {}. {advisory}", idx + 1);
    }
}
