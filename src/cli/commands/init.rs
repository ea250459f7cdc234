//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "variant-report.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing variant report configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [dataset] path at your variant workbook or CSV/TSV export");
                println!("  2. Fill in the [patient] section");
                println!(
                    "  3. Validate configuration: variant-report validate-config --check-dataset"
                );
                println!("  4. Start the service: variant-report serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate the starter configuration
    fn generate_config() -> String {
        r#"# Variant Report Configuration File
# ${VAR} references are substituted from the environment.
# Any key can be overridden with VARIANT_REPORT_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[server]
host = "127.0.0.1"
port = 5001
cors_enabled = true

[dataset]
# Variant table with an Uploaded_variation column (.xlsx/.xls/.ods or CSV/TSV)
path = "dataset/information_data.csv"

# Field delimiter; inferred from the extension when omitted (.tsv => tab)
# delimiter = ","

[report]
# Generated PDFs are written here
output_dir = "generated_reports"

title = "Variant Analysis Report"

# Defaults to the service version and the current month
# version_label = "v1.0.0 (March 2025)"

# PNG drawn in the page header
# logo_path = "asset/logo.png"

# Reject malformed ACMG criteria instead of skipping them
strict_annotations = false

[patient]
name = "John Doe"
date_of_birth = "12/01/1987"
sex = "Male"
test_ordered_by = "Dr. Fulan, Amazing Hospital Centre"

[logging]
# JSON log files alongside console output
local_enabled = false
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_is_valid() {
        let config = load_config_str(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.dataset.path, "dataset/information_data.csv");
        assert_eq!(config.patient.name, "John Doe");
        assert!(!config.report.strict_annotations);
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("variant-report.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("variant-report.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");

        let forced = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(forced.execute().await.unwrap(), 0);
    }
}
