//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (VARIANT_REPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use variant_report::config::loader::load_config;
///
/// let config = load_config("variant-report.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file access.
pub fn load_config_str(contents: &str) -> Result<AppConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ReportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Don't process env vars in comments
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ReportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using VARIANT_REPORT_* prefix
///
/// Environment variables follow the pattern: VARIANT_REPORT_<SECTION>_<KEY>
/// For example: VARIANT_REPORT_SERVER_PORT, VARIANT_REPORT_DATASET_PATH
fn apply_env_overrides(config: &mut AppConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("VARIANT_REPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("VARIANT_REPORT_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_SERVER_PORT") {
        if let Ok(port) = val.parse() {
            config.server.port = port;
        }
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_SERVER_CORS_ENABLED") {
        config.server.cors_enabled = val.parse().unwrap_or(true);
    }

    // Dataset overrides
    if let Ok(val) = std::env::var("VARIANT_REPORT_DATASET_PATH") {
        config.dataset.path = val;
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_DATASET_DELIMITER") {
        config.dataset.delimiter = Some(val);
    }

    // Report overrides
    if let Ok(val) = std::env::var("VARIANT_REPORT_REPORT_OUTPUT_DIR") {
        config.report.output_dir = val;
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_REPORT_VERSION_LABEL") {
        config.report.version_label = Some(val);
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_REPORT_LOGO_PATH") {
        config.report.logo_path = Some(val);
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_REPORT_STRICT_ANNOTATIONS") {
        config.report.strict_annotations = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VARIANT_REPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VARIANT_REPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VR_LOADER_TEST_VAR", "test_value");
        let input = "path = \"${VR_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"test_value\"\n");
        std::env::remove_var("VR_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VR_LOADER_MISSING_VAR");
        let input = "path = \"${VR_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("VR_LOADER_COMMENTED_VAR");
        let input = "# path = \"${VR_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080

[dataset]
path = "data/variants.tsv"

[report]
output_dir = "/tmp/reports"
version_label = "v1.0.0 (January 2025)"
strict_annotations = true

[patient]
name = "Jane Roe"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.dataset.delimiter_byte(), b'\t');
        assert_eq!(
            config.report.version_label.as_deref(),
            Some("v1.0.0 (January 2025)")
        );
        assert!(config.report.strict_annotations);
        assert_eq!(config.patient.name, "Jane Roe");
        assert_eq!(config.patient.sex, "Male");
    }

    #[test]
    fn test_load_config_invalid_values() {
        let result = load_config_str("[logging]\nlocal_rotation = \"weekly\"\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
