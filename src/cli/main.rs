//! Command-line interface entry point for `IntelliGrade`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::dashboard::DashboardArgs;
use commands::report::ReportArgs;
use intelli_grade::config::Config;
use intelli_grade::info;
use intelli_grade::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    let (mut config, effective) = split_configs(Config::load(), &args);
    let defaults = Config::from_defaults();

    init_logging(&args, &effective);

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        Command::Students { data } => commands::students::run(data.as_deref(), &effective),
        Command::Student { id, data, json } => {
            commands::student::run(&id, data.as_deref(), json, &effective)
        }
        Command::Cohort { data, json } => commands::cohort::run(data.as_deref(), json, &effective),
        Command::Dashboard {
            data,
            student,
            watch,
            iterations,
            json,
        } => commands::dashboard::run(
            &DashboardArgs {
                data: data.as_deref(),
                student: student.as_deref(),
                watch,
                iterations,
                json,
            },
            &effective,
        ),
        Command::Report {
            id,
            data,
            format,
            output,
            chrome,
        } => commands::report::run(
            &ReportArgs {
                id: &id,
                data: data.as_deref(),
                format: format.as_deref(),
                output: output.as_deref(),
                chrome: chrome.as_deref(),
            },
            &effective,
        ),
        Command::Export { data, output } => {
            commands::export::run(data.as_deref(), output.as_deref(), &effective)
        }
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Stored config for `config` subcommands, and the effective config with CLI
/// overrides applied for everything else
///
/// Overrides never reach the stored copy, so `config set` cannot persist them.
fn split_configs(stored: Config, args: &Cli) -> (Config, Config) {
    let mut effective = stored.clone();
    effective.apply_overrides(&args.to_config_overrides());
    (stored, effective)
}

/// Configure level, debug and verbose flags and the optional file sink
fn init_logging(args: &Cli, config: &Config) {
    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = Level::parse(&config.logging.level).unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if config.logging.file.is_empty() {
        return;
    }
    let log_path = PathBuf::from(&config.logging.file);
    let display_path = log_path.to_string_lossy();
    if init_file_logging(&log_path) {
        if verbose {
            eprintln!("✓ File logging initialized at: {display_path}");
        } else {
            info!("File logging initialized at: {display_path}");
        }
    } else {
        eprintln!("✗ Failed to initialize file logging at: {display_path}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn overrides_stay_out_of_stored_config() {
        let args = Cli::try_parse_from([
            "intelligrade",
            "--risk-threshold",
            "9.5",
            "--reports-dir",
            "/tmp/elsewhere",
            "config",
            "set",
            "theme",
            "dark",
        ])
        .expect("arguments should parse");
        let stored = Config::from_defaults();
        let (config, effective) = split_configs(stored.clone(), &args);

        assert_eq!(config.analysis.risk_threshold, stored.analysis.risk_threshold);
        assert_eq!(config.paths.reports_dir, stored.paths.reports_dir);
        assert_eq!(effective.analysis.risk_threshold, 9.5);
        assert_eq!(effective.paths.reports_dir, "/tmp/elsewhere");
    }
}
