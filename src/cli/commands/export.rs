//! Export command handler

use super::{ensure_dir, load_dashboard};
use intelli_grade::config::Config;
use intelli_grade::error;
use intelli_grade::export::{default_export_name, export_dataset_csv};
use std::path::{Path, PathBuf};

/// Write the loaded dataset back out as CSV
pub fn run(data: Option<&Path>, output: Option<&Path>, config: &Config) -> Result<(), String> {
    let dashboard = load_dashboard(data, config)?;

    let path = if let Some(path) = output {
        path.to_path_buf()
    } else {
        let dir = if config.paths.exports_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&config.paths.exports_dir)
        };
        ensure_dir(&dir)?;
        dir.join(default_export_name())
    };

    let written = export_dataset_csv(dashboard.dataset(), &path).map_err(|e| {
        error!("Export to {} failed: {e}", path.display());
        format!("✗ {e}")
    })?;
    println!(
        "✓ Exported {} records to {}",
        dashboard.dataset().len(),
        written.display()
    );
    Ok(())
}
