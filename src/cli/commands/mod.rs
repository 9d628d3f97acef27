//! CLI command handlers for `IntelliGrade`.
//!
//! Each data command is implemented in its own submodule and returns
//! `Result<(), String>`, with messages ready to print.

pub mod cohort;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod report;
pub mod student;
pub mod students;

use intelli_grade::config::Config;
use intelli_grade::dashboard::Dashboard;
use intelli_grade::{error, verbose, warn};
use std::path::{Path, PathBuf};

/// Resolve the survey file: `--data` wins, then config `data_file`
pub fn resolve_data_file(data: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    if let Some(path) = data {
        return Ok(path.to_path_buf());
    }
    if config.paths.data_file.is_empty() {
        return Err(
            "✗ No survey file given. Pass --data FILE or run `intelligrade config set data_file FILE`"
                .to_string(),
        );
    }
    Ok(PathBuf::from(&config.paths.data_file))
}

/// Load the survey into a dashboard context and surface load issues
pub fn load_dashboard(data: Option<&Path>, config: &Config) -> Result<Dashboard, String> {
    let path = resolve_data_file(data, config)?;
    let dashboard = Dashboard::load(&path, config.analysis_settings()).map_err(|e| {
        error!("Failed to load {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })?;

    let report = dashboard.load_report();
    if !report.is_clean() {
        warn!(
            "{} issue(s) while loading {} ({} row(s) skipped, {} value(s) read as 0)",
            report.issues.len(),
            path.display(),
            report.rejected_rows(),
            report.zero_defaulted_cells()
        );
        for issue in &report.issues {
            verbose!("  {issue}");
        }
    }

    Ok(dashboard)
}

/// Serialize a value as pretty JSON for `--json` output
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("✗ Failed to encode JSON: {e}"))
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("✗ Failed to create directory {}: {e}", dir.display()))
}
