//! Chart generation for reports
//!
//! Markdown reports embed Mermaid `xychart-beta` bar charts built from the
//! same series the dashboard exposes.

pub mod mermaid;

pub use mermaid::MermaidGenerator;
