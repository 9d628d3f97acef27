//! CLI argument definitions for `IntelliGrade`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use intelli_grade::config::ConfigOverrides;
use intelli_grade::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `risk_threshold`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List every student in the survey file.
    Students {
        /// Survey CSV file (defaults to config `data_file`)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
    /// Show metrics and recommendations for one student.
    Student {
        /// Student identifier
        #[arg(value_name = "ID")]
        id: String,

        /// Survey CSV file (defaults to config `data_file`)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show cohort totals and the per-college breakdown.
    Cohort {
        /// Survey CSV file (defaults to config `data_file`)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Render the dashboard for a student (the first one by default).
    Dashboard {
        /// Survey CSV file (defaults to config `data_file`)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Student to select
        #[arg(short, long, value_name = "ID")]
        student: Option<String>,

        /// Reload the file every `refresh_interval` seconds
        #[arg(short, long)]
        watch: bool,

        /// Stop watching after this many reloads
        #[arg(long, value_name = "N")]
        iterations: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate a report for one student.
    ///
    /// Covers student information, key metrics, domain scores,
    /// recommendations and the college-wide analysis.
    Report {
        /// Student identifier
        #[arg(value_name = "ID")]
        id: String,

        /// Survey CSV file (defaults to config `data_file`)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Report format: markdown (md), html, or pdf (defaults to config `export_format`)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Output file path (defaults to a timestamped file in `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Chrome/Chromium executable for PDF output
        #[arg(long, value_name = "PATH")]
        chrome: Option<PathBuf>,
    },
    /// Export the whole dataset back to CSV.
    Export {
        /// Survey CSV file (defaults to config `data_file`)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Output file path (defaults to a timestamped file in `exports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "intelligrade",
    about = "IntelliGrade student survey analytics",
    version = intelli_grade::get_version()
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override the risk threshold for this run
    #[arg(long, value_name = "VALUE")]
    pub risk_threshold: Option<f64>,

    /// Override the default survey file for this run
    #[arg(long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Override the reports output directory for this run
    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override the exports output directory for this run
    #[arg(long, value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. Overrides are applied for the current run
    /// only.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self.log_file.as_ref().map(path_string),
            verbose: self.verbose.then_some(true),
            risk_threshold: self.risk_threshold,
            data_file: self.data_file.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
            exports_dir: self.exports_dir.as_ref().map(path_string),
        }
    }
}
