//! Markdown report generator
//!
//! Generates student reports in Markdown format with embedded Mermaid charts.
//! These reports render well in GitHub, GitLab, and VS Code.

use crate::core::report::visualization::MermaidGenerator;
use crate::core::report::{ReportContext, ReportGenerator, FOOTER, INSTITUTION, REPORT_TITLE};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let student = &ctx.student;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", REPORT_TITLE);
        output = output.replace("{{institution}}", INSTITUTION);
        output = output.replace("{{footer}}", FOOTER);

        output = output.replace("{{student_id}}", &escape_cell(&student.student_id));
        output = output.replace("{{college}}", &escape_cell(&student.college));
        output = output.replace("{{year_level}}", &escape_cell(&student.year_level));
        output = output.replace("{{generated_at}}", &ctx.generated_at);

        output = output.replace("{{ai_index}}", &escape_cell(&student.ai_index_display));
        output = output.replace("{{risk}}", &student.risk.to_string());
        output = output.replace("{{final_grade}}", &escape_cell(&student.final_grade));
        output = output.replace("{{motivation}}", &escape_cell(&student.motivation_display));

        output = output.replace("{{domain_rows}}", &Self::generate_domain_rows(ctx));
        output = output.replace("{{recommendations}}", &Self::generate_recommendations(ctx));

        output = output.replace(
            "{{total_students}}",
            &ctx.cohort.total_students.to_string(),
        );
        output = output.replace("{{average_grade}}", &ctx.average_grade_display());
        output = output.replace(
            "{{high_risk_count}}",
            &ctx.cohort.high_risk_count.to_string(),
        );
        output = output.replace("{{college_rows}}", &Self::generate_college_rows(ctx));

        // Charts are substituted last so their text is never rescanned.
        let (domain_chart, college_chart) = if ctx.include_charts() {
            (
                format!(
                    "\n{}",
                    MermaidGenerator::bar_chart(
                        "Dependency Domain Scores",
                        &student.domains.series()
                    )
                ),
                format!("\n{}", MermaidGenerator::college_chart(&ctx.college_series())),
            )
        } else {
            (String::new(), String::new())
        };
        output = output.replace("{{domain_chart}}", &domain_chart);
        output = output.replace("{{college_chart}}", &college_chart);

        output
    }

    fn generate_domain_rows(ctx: &ReportContext) -> String {
        let mut table = String::new();
        let series = ctx.student.domains.series();
        for (label, value) in series.labels.iter().zip(&series.values) {
            let _ = writeln!(table, "| {label} | {value} |");
        }
        table
    }

    fn generate_recommendations(ctx: &ReportContext) -> String {
        let mut list = String::new();
        for (idx, advisory) in ctx.student.recommendations.iter().enumerate() {
            let _ = writeln!(list, "{}. {advisory}", idx + 1);
        }
        list
    }

    fn generate_college_rows(ctx: &ReportContext) -> String {
        let mut table = String::new();
        for row in ctx.college_rows() {
            let _ = writeln!(
                table,
                "| {} | {} | {:.2} |",
                escape_cell(&row.name),
                row.count,
                row.avg_ai
            );
        }
        table
    }
}

/// Escape pipes so free text cannot break a table row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
