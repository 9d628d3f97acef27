//! Integration tests for configuration management

use intelli_grade::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(!config.paths.data_file.is_empty());
    assert!(!config.paths.reports_dir.is_empty());
    assert!(!config.paths.exports_dir.is_empty());
    assert!((config.analysis.risk_threshold - 5.5).abs() < f64::EPSILON);
    assert_eq!(config.dashboard.refresh_interval, 300);
}

#[test]
fn test_config_from_toml_all_sections() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[analysis]
risk_threshold = 6.0
grade_precision = 1

[dashboard]
theme = "dark"
chart_animation = false
auto_refresh = true
refresh_interval = 60
enable_notifications = true
notify_high_risk = false

[export]
format = "html"
include_charts = false

[paths]
data_file = "./survey.csv"
reports_dir = "./reports"
exports_dir = "./exports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert!((config.analysis.risk_threshold - 6.0).abs() < f64::EPSILON);
    assert_eq!(config.analysis.grade_precision, 1);
    assert_eq!(config.dashboard.theme, "dark");
    assert!(config.dashboard.auto_refresh);
    assert_eq!(config.dashboard.refresh_interval, 60);
    assert_eq!(config.export.format, "html");
    assert!(!config.export.include_charts);
    assert_eq!(config.paths.data_file, "./survey.csv");
    assert_eq!(config.paths.exports_dir, "./exports");

    let settings = config.analysis_settings();
    assert!(!settings.notify_high_risk);
    assert!(!settings.include_charts);
    assert_eq!(settings.refresh_interval, 60);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert!((config.analysis.risk_threshold - 5.5).abs() < f64::EPSILON);
    assert_eq!(config.analysis.grade_precision, 2);
    assert!(config.dashboard.notify_high_risk);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$INTELLIGRADE/test.log"

[paths]
reports_dir = "$INTELLIGRADE/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("intelligrade"));
    assert!(!config.logging.file.contains("$INTELLIGRADE"));
    assert!(config.paths.reports_dir.ends_with("reports"));
    assert!(!config.paths.reports_dir.contains("$INTELLIGRADE"));
}

#[test]
fn test_config_set_validates_values() {
    let mut config = Config::from_defaults();

    config.set("level", "INFO").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("info"));

    config
        .set("risk-threshold", "6.25")
        .expect("Failed to set threshold");
    assert_eq!(config.get("risk_threshold").as_deref(), Some("6.25"));

    config
        .set("export_format", "md")
        .expect("Failed to set format");
    assert_eq!(config.export.format, "markdown");

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("risk_threshold", "NaN").is_err());
    assert!(config.set("theme", "blue").is_err());
    assert!(config.set("refresh_interval", "0").is_err());
    assert!(config.set("auto_refresh", "maybe").is_err());
    assert!(config.set("export_format", "docx").is_err());
    assert!(config.set("unknown_key", "value").is_err());
    assert!(config.get("unknown_key").is_none());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("theme", "dark").expect("Failed to set theme");
    config
        .unset("theme", &defaults)
        .expect("Failed to unset theme");
    assert_eq!(config.dashboard.theme, defaults.dashboard.theme);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("risk_threshold", "4.5")
        .expect("Failed to set threshold");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert!((loaded.analysis.risk_threshold - 4.5).abs() < f64::EPSILON);
}

#[test]
fn test_load_creates_missing_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
}

#[test]
fn test_load_falls_back_on_invalid_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "[logging\nlevel = ").expect("Failed to write config");

    let config = Config::load_from(&config_file);
    assert_eq!(config.paths.data_file, Config::from_defaults().paths.data_file);
}

#[test]
fn test_load_merges_new_defaults_into_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").expect("Failed to write config");

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, "error");
    assert!(!config.paths.reports_dir.is_empty());

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(content.contains("reports_dir"));
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        risk_threshold: Some(3.0),
        data_file: Some("./cohort.csv".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        exports_dir: Some("./custom_exports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert!((config.analysis_settings().risk_threshold - 3.0).abs() < f64::EPSILON);
    assert_eq!(config.paths.data_file, "./cohort.csv");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.paths.exports_dir, "./custom_exports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.data_file, before.paths.data_file);
    assert_eq!(config.paths.reports_dir, before.paths.reports_dir);
    assert_eq!(config.logging.file, before.logging.file);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[analysis]"));
    assert!(display_str.contains("[dashboard]"));
    assert!(display_str.contains("[export]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("risk_threshold"));
    assert!(display_str.contains("refresh_interval"));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
data_file = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.data_file, defaults.paths.data_file);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
    assert!(path.starts_with(Config::get_intelligrade_dir()));
}
