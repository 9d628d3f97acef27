//! Mermaid bar chart generator
//!
//! Produces fenced `xychart-beta` blocks that GitHub, GitLab and most Markdown
//! viewers render inline.

use crate::core::cohort::CollegeSeries;
use crate::core::metrics::BarSeries;
use std::fmt::Write;

/// Generator for Mermaid chart syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Bar chart for a labelled series
    ///
    /// The y axis runs from 0 to the series' fixed maximum, or to the largest
    /// value when the series is unbounded.
    #[must_use]
    pub fn bar_chart(title: &str, series: &BarSeries) -> String {
        let axis_max = series
            .axis_max
            .unwrap_or_else(|| series.values.iter().copied().fold(0.0, f64::max));
        Self::chart(title, &series.name, &series.labels, &series.values, axis_max)
    }

    /// Bar chart of average AI dependency index per college, on abbreviated labels
    #[must_use]
    pub fn college_chart(series: &CollegeSeries) -> String {
        let axis_max = series.avg_ai.iter().copied().fold(0.0, f64::max).ceil();
        Self::chart(
            "Average AI Dependency Index by College",
            "Avg AI Index",
            &series.short_labels,
            &series.avg_ai,
            axis_max.max(1.0),
        )
    }

    fn chart(title: &str, y_label: &str, labels: &[String], values: &[f64], max: f64) -> String {
        let mut output = String::from("```mermaid\nxychart-beta\n");
        let _ = writeln!(output, "    title \"{}\"", Self::sanitize_label(title));

        let labels: Vec<String> = labels
            .iter()
            .map(|l| format!("\"{}\"", Self::sanitize_label(l)))
            .collect();
        let _ = writeln!(output, "    x-axis [{}]", labels.join(", "));
        let _ = writeln!(
            output,
            "    y-axis \"{}\" 0 --> {max}",
            Self::sanitize_label(y_label)
        );

        let values: Vec<String> = values.iter().map(|v| format!("{v:.2}")).collect();
        let _ = writeln!(output, "    bar [{}]", values.join(", "));

        output.push_str("```\n");
        output
    }

    /// Strip characters that would end a quoted Mermaid label
    fn sanitize_label(label: &str) -> String {
        label.replace('"', "'")
    }
}
