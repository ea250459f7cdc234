//! Configuration schema types
//!
//! Every section has defaults, so an empty file is a valid configuration.

use crate::core::document::REPORT_TITLE;
use crate::domain::patient::PatientInfo;
use serde::{Deserialize, Serialize};

/// Main service configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Variant dataset source
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Report generation settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Patient details printed on reports unless a request supplies its own
    #[serde(default)]
    pub patient: PatientInfo,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.dataset.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        Ok(())
    }

    /// `host:port` bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
        }
    }
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the CSV or TSV export
    #[serde(default = "default_dataset_path")]
    pub path: String,

    /// Field delimiter; inferred from the file extension when unset
    #[serde(default)]
    pub delimiter: Option<String>,
}

impl DatasetConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("dataset.path cannot be empty".to_string());
        }
        if let Some(ref delimiter) = self.delimiter {
            let unescaped = unescape_delimiter(delimiter);
            if unescaped.len() != 1 || !unescaped.is_ascii() {
                return Err(format!(
                    "Invalid dataset.delimiter '{}'. Must be a single ASCII character",
                    delimiter
                ));
            }
        }
        Ok(())
    }

    /// Whether `path` names a spreadsheet workbook rather than a delimited export
    pub fn is_workbook(&self) -> bool {
        let lower = self.path.to_lowercase();
        WORKBOOK_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }

    /// Delimiter byte: configured value, else `\t` for `.tsv`/`.tab` files, else `,`
    pub fn delimiter_byte(&self) -> u8 {
        if let Some(ref delimiter) = self.delimiter {
            if let Some(byte) = unescape_delimiter(delimiter).bytes().next() {
                return byte;
            }
        }

        let lower = self.path.to_lowercase();
        if lower.ends_with(".tsv") || lower.ends_with(".tab") {
            b'\t'
        } else {
            b','
        }
    }
}

const WORKBOOK_EXTENSIONS: [&str; 4] = [".xlsx", ".xlsm", ".xls", ".ods"];

// TOML users write "\t" literally more often than a real tab
fn unescape_delimiter(value: &str) -> String {
    if value == "\\t" {
        "\t".to_string()
    } else {
        value.to_string()
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            delimiter: None,
        }
    }
}

/// Report generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory PDF artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Text after "Generated Version:"; derived from the crate version and
    /// the current month when unset
    #[serde(default)]
    pub version_label: Option<String>,

    /// PNG logo drawn in the first-page header
    #[serde(default)]
    pub logo_path: Option<String>,

    /// First-page header title
    #[serde(default = "default_report_title")]
    pub title: String,

    /// Fail reports whose ACMG criteria contain malformed tokens
    #[serde(default)]
    pub strict_annotations: bool,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("report.output_dir cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("report.title cannot be empty".to_string());
        }
        if let Some(ref logo) = self.logo_path {
            if !logo.to_lowercase().ends_with(".png") {
                return Err(format!("report.logo_path '{logo}' must be a PNG file"));
            }
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            version_label: None,
            logo_path: None,
            title: default_report_title(),
            strict_annotations: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_true() -> bool {
    true
}

fn default_dataset_path() -> String {
    "dataset/information_data.csv".to_string()
}

fn default_output_dir() -> String {
    "generated_reports".to_string()
}

fn default_report_title() -> String {
    REPORT_TITLE.to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
