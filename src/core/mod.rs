//! Core module: dataset loading, metric derivation, aggregation and reporting

pub mod coercion;
pub mod cohort;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod recommend;
pub mod report;

/// Returns the current version of the `IntelliGrade` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
