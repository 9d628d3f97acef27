//! Report command handler
//!
//! Generates a per-student report in Markdown, HTML or PDF.

use super::{ensure_dir, load_dashboard};
use intelli_grade::config::Config;
use intelli_grade::report::{PdfReporter, ReportContext, ReportFormat, ReportGenerator};
use intelli_grade::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options for one report run
pub struct ReportArgs<'a> {
    /// Student identifier
    pub id: &'a str,
    /// Survey file override
    pub data: Option<&'a Path>,
    /// Format name; config `export_format` when `None`
    pub format: Option<&'a str>,
    /// Output path; timestamped file in `reports_dir` when `None`
    pub output: Option<&'a Path>,
    /// Chrome/Chromium executable for PDF output
    pub chrome: Option<&'a Path>,
}

/// Run the report command and print where the report was written
pub fn run(args: &ReportArgs, config: &Config) -> Result<(), String> {
    match generate_report(args, config) {
        Ok(path) => {
            println!("✓ Report generated: {}", path.display());
            Ok(())
        }
        Err(err) => {
            error!("Report generation failed for {}: {err}", args.id);
            Err(err)
        }
    }
}

fn generate_report(args: &ReportArgs, config: &Config) -> Result<PathBuf, String> {
    let format_str = args.format.unwrap_or(config.export.format.as_str());
    let format = ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))?;

    let dashboard = load_dashboard(args.data, config)?;
    let ctx = ReportContext::new(dashboard.dataset(), args.id, *dashboard.settings())
        .map_err(|e| format!("✗ {e}"))?;

    let output_path = resolve_output_path(args.output, &ctx, format, config)?;

    let reporter: Box<dyn ReportGenerator> = match (format, args.chrome) {
        (ReportFormat::Pdf, Some(chrome)) => {
            Box::new(PdfReporter::with_converter(&chrome.to_string_lossy()))
        }
        _ => format.reporter(),
    };
    reporter
        .generate(&ctx, &output_path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    info!(
        "{format} report for {} written to {}",
        args.id,
        output_path.display()
    );
    Ok(output_path)
}

/// Explicit output path, or `<reports_dir>/IntelliGrade_Report_<id>_<ts>.<ext>`
fn resolve_output_path(
    output: Option<&Path>,
    ctx: &ReportContext,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        return Ok(path.to_path_buf());
    }
    let reports_dir = if config.paths.reports_dir.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(&config.paths.reports_dir)
    };
    ensure_dir(&reports_dir)?;
    Ok(reports_dir.join(ctx.default_file_name(format)))
}
