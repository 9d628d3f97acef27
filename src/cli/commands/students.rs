//! Students command handler

use super::load_dashboard;
use intelli_grade::config::Config;
use intelli_grade::metrics::{classify_risk, option_label};
use std::path::Path;

/// List every student with their risk level, in file order
pub fn run(data: Option<&Path>, config: &Config) -> Result<(), String> {
    let dashboard = load_dashboard(data, config)?;
    let threshold = dashboard.settings().risk_threshold;
    let records = dashboard.dataset().records();

    if records.is_empty() {
        println!("No students in dataset");
        return Ok(());
    }

    println!("\n=== Students ({}) ===\n", records.len());
    for record in records {
        println!(
            "  [{:<4}] {}",
            classify_risk(record, threshold).to_string(),
            option_label(record)
        );
    }
    Ok(())
}
