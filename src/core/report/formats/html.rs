//! HTML report generator
//!
//! Renders the `report.html` askama template into a self-contained page with
//! embedded CSS. Chart sections are plain CSS bars, so the page needs no
//! JavaScript and prints cleanly to PDF.

use crate::core::metrics::{RiskLevel, DOMAIN_AXIS_MAX};
use crate::core::report::{ReportContext, ReportGenerator, FOOTER, INSTITUTION, REPORT_TITLE};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// One domain score row
struct DomainBar {
    label: String,
    value: String,
    width: String,
}

/// One college row
struct CollegeBar {
    name: String,
    short_label: String,
    count: usize,
    avg_ai: String,
    width: String,
}

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReport<'a> {
    title: &'a str,
    institution: &'a str,
    footer: &'a str,
    student: &'a crate::core::metrics::StudentMetrics,
    generated_at: &'a str,
    risk: String,
    risk_class: &'static str,
    include_charts: bool,
    domain_bars: Vec<DomainBar>,
    recommendations: Vec<String>,
    total_students: usize,
    average_grade: String,
    high_risk_count: usize,
    colleges: Vec<CollegeBar>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build<'a>(ctx: &'a ReportContext) -> HtmlReport<'a> {
        let series = ctx.student.domains.series();
        let domain_bars = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, value)| DomainBar {
                label: label.clone(),
                value: value.to_string(),
                width: bar_width(*value, DOMAIN_AXIS_MAX),
            })
            .collect();

        let rows = ctx.college_rows();
        let max_avg = rows.iter().map(|r| r.avg_ai).fold(0.0, f64::max);
        let colleges = rows
            .into_iter()
            .map(|row| CollegeBar {
                width: bar_width(row.avg_ai, max_avg),
                avg_ai: format!("{:.2}", row.avg_ai),
                name: row.name,
                short_label: row.short_label,
                count: row.count,
            })
            .collect();

        HtmlReport {
            title: REPORT_TITLE,
            institution: INSTITUTION,
            footer: FOOTER,
            student: &ctx.student,
            generated_at: &ctx.generated_at,
            risk: ctx.student.risk.to_string(),
            risk_class: match ctx.student.risk {
                RiskLevel::High => "risk-high",
                RiskLevel::Low => "risk-low",
            },
            include_charts: ctx.include_charts(),
            domain_bars,
            recommendations: ctx
                .student
                .recommendations
                .iter()
                .map(ToString::to_string)
                .collect(),
            total_students: ctx.cohort.total_students,
            average_grade: ctx.average_grade_display(),
            high_risk_count: ctx.cohort.high_risk_count,
            colleges,
        }
    }
}

/// Bar width in percent of `max`, clamped to `[0, 100]`
fn bar_width(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "0".to_string();
    }
    format!("{:.1}", (value / max * 100.0).clamp(0.0, 100.0))
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::build(ctx).render()?)
    }
}
