//! Configuration module for `IntelliGrade`

use crate::core::metrics::DEFAULT_RISK_THRESHOLD;
use crate::core::report::ReportFormat;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$INTELLIGRADE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path, empty for console output
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Analysis thresholds and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// AI dependency index above which a student is high risk
    pub risk_threshold: f64,
    /// Decimal places for displayed averages
    pub grade_precision: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            grade_precision: 2,
        }
    }
}

/// Dashboard presentation and refresh behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// `light` or `dark`
    pub theme: String,
    /// Animate chart transitions
    pub chart_animation: bool,
    /// Reload the data file periodically
    pub auto_refresh: bool,
    /// Seconds between reloads
    pub refresh_interval: u64,
    /// Master switch for notifications
    pub enable_notifications: bool,
    /// Notify when a high-risk student is selected
    pub notify_high_risk: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            chart_animation: true,
            auto_refresh: false,
            refresh_interval: 300,
            enable_notifications: true,
            notify_high_risk: true,
        }
    }
}

/// Report export preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default report format (md, html, pdf)
    pub format: String,
    /// Include chart sections in reports
    pub include_charts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "pdf".to_string(),
            include_charts: true,
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Survey CSV used when a command is given no `--data` file
    #[serde(default)]
    pub data_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Directory for dataset exports
    #[serde(default)]
    pub exports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override risk threshold
    pub risk_threshold: Option<f64>,
    /// Override default data file
    pub data_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override exports output directory
    pub exports_dir: Option<String>,
}

/// Parameters the analysis core needs, taken from configuration once per run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    /// AI dependency index above which a student is high risk
    pub risk_threshold: f64,
    /// Decimal places for displayed averages
    pub grade_precision: usize,
    /// Log a warning when a high-risk student is selected
    pub notify_high_risk: bool,
    /// Include chart sections in reports
    pub include_charts: bool,
    /// Seconds between dashboard reloads
    pub refresh_interval: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Config::default().analysis_settings()
    }
}

impl Config {
    /// Get the `$INTELLIGRADE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/intelligrade`
    /// - macOS: `~/Library/Application Support/intelligrade`
    /// - Windows: `%APPDATA%\intelligrade`
    #[must_use]
    pub fn get_intelligrade_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intelligrade")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_intelligrade_dir`](Self::get_intelligrade_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_intelligrade_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in. Numeric and boolean fields already fall back to their defaults
    /// during deserialization.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        changed |= fill_missing(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_missing(&mut self.logging.file, &defaults.logging.file);
        changed |= fill_missing(&mut self.dashboard.theme, &defaults.dashboard.theme);
        changed |= fill_missing(&mut self.export.format, &defaults.export.format);
        changed |= fill_missing(&mut self.paths.data_file, &defaults.paths.data_file);
        changed |= fill_missing(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        changed |= fill_missing(&mut self.paths.exports_dir, &defaults.paths.exports_dir);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(threshold) = overrides.risk_threshold {
            self.analysis.risk_threshold = threshold;
        }
        if let Some(data_file) = &overrides.data_file {
            self.paths.data_file.clone_from(data_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(exports_dir) = &overrides.exports_dir {
            self.paths.exports_dir.clone_from(exports_dir);
        }
    }

    /// Build the parameter struct handed to the analysis core
    #[must_use]
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            risk_threshold: self.analysis.risk_threshold,
            grade_precision: self.analysis.grade_precision,
            notify_high_risk: self.dashboard.enable_notifications
                && self.dashboard.notify_high_risk,
            include_charts: self.export.include_charts,
            refresh_interval: self.dashboard.refresh_interval,
        }
    }

    /// Expand `$INTELLIGRADE` to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_intelligrade_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$INTELLIGRADE` in path values. Missing sections and fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_file = Self::expand_variables(&config.paths.data_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// On first run the defaults are written out. Later runs merge any newly
    /// added defaults into the existing file. Falls back to defaults on a
    /// read or parse failure.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit file
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// [`save`](Self::save) to an explicit file
    ///
    /// # Errors
    /// Returns an error if serialization, directory creation or the write fails.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Keys are field names; `-` and `_` are interchangeable. Returns `None` for
    /// an unknown key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "risk_threshold" => self.analysis.risk_threshold.to_string(),
            "grade_precision" => self.analysis.grade_precision.to_string(),
            "theme" => self.dashboard.theme.clone(),
            "chart_animation" => self.dashboard.chart_animation.to_string(),
            "auto_refresh" => self.dashboard.auto_refresh.to_string(),
            "refresh_interval" => self.dashboard.refresh_interval.to_string(),
            "enable_notifications" => self.dashboard.enable_notifications.to_string(),
            "notify_high_risk" => self.dashboard.notify_high_risk.to_string(),
            "export_format" => self.export.format.clone(),
            "include_charts" => self.export.include_charts.to_string(),
            "data_file" => self.paths.data_file.clone(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "exports_dir" => self.paths.exports_dir.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// The value is validated for the key's type. Call [`save()`](Config::save)
    /// to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => {
                if Level::parse(value).is_none() {
                    return Err(format!(
                        "Invalid log level '{value}' (expected error, warn, info or debug)"
                    ));
                }
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "risk_threshold" => {
                self.analysis.risk_threshold = value
                    .parse::<f64>()
                    .ok()
                    .filter(|t| t.is_finite())
                    .ok_or_else(|| format!("Invalid number for '{key}': '{value}'"))?;
            }
            "grade_precision" => {
                self.analysis.grade_precision = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid precision for '{key}': '{value}'"))?;
            }
            "theme" => match value {
                "light" | "dark" => self.dashboard.theme = value.to_string(),
                _ => return Err(format!("Invalid theme '{value}' (expected light or dark)")),
            },
            "chart_animation" => self.dashboard.chart_animation = parse_bool(key, value)?,
            "auto_refresh" => self.dashboard.auto_refresh = parse_bool(key, value)?,
            "refresh_interval" => {
                self.dashboard.refresh_interval = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| format!("Invalid interval for '{key}': '{value}'"))?;
            }
            "enable_notifications" => {
                self.dashboard.enable_notifications = parse_bool(key, value)?;
            }
            "notify_high_risk" => self.dashboard.notify_high_risk = parse_bool(key, value)?,
            "export_format" => {
                let format: ReportFormat = value.parse()?;
                self.export.format = format.to_string();
            }
            "include_charts" => self.export.include_charts = parse_bool(key, value)?,
            "data_file" => self.paths.data_file = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "exports_dir" => self.paths.exports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key, restoring it from `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let default_value = defaults
            .get(key)
            .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
        self.set(key, &default_value)
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds when there is no
    /// file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn fill_missing(target: &mut String, source: &str) -> bool {
    if target.is_empty() && !source.is_empty() {
        *target = source.to_string();
        true
    } else {
        false
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[analysis]")?;
        writeln!(f, "  risk_threshold = {}", self.analysis.risk_threshold)?;
        writeln!(f, "  grade_precision = {}", self.analysis.grade_precision)?;

        writeln!(f, "\n[dashboard]")?;
        writeln!(f, "  theme = \"{}\"", self.dashboard.theme)?;
        writeln!(f, "  chart_animation = {}", self.dashboard.chart_animation)?;
        writeln!(f, "  auto_refresh = {}", self.dashboard.auto_refresh)?;
        writeln!(f, "  refresh_interval = {}", self.dashboard.refresh_interval)?;
        writeln!(
            f,
            "  enable_notifications = {}",
            self.dashboard.enable_notifications
        )?;
        writeln!(f, "  notify_high_risk = {}", self.dashboard.notify_high_risk)?;

        writeln!(f, "\n[export]")?;
        writeln!(f, "  format = \"{}\"", self.export.format)?;
        writeln!(f, "  include_charts = {}", self.export.include_charts)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_file = \"{}\"", self.paths.data_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;

        Ok(())
    }
}
