//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the service configuration file.

use crate::adapters::dataset::load_dataset;
use crate::config::load_config;
use crate::core::coordinator::ReportSettings;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also load the dataset and report its size
    #[arg(long)]
    pub check_dataset: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        let settings = ReportSettings::from_config(&config.report);

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen Address: {}", config.server.bind_address());
        println!("  CORS Enabled: {}", config.server.cors_enabled);
        println!("  Dataset: {}", config.dataset.path);
        println!(
            "  Delimiter: {:?}",
            char::from(config.dataset.delimiter_byte())
        );
        println!("  Output Directory: {}", config.report.output_dir);
        println!("  Report Title: {}", settings.title);
        println!("  Version Label: {}", settings.version_label);
        println!(
            "  Logo: {}",
            config.report.logo_path.as_deref().unwrap_or("(none)")
        );
        println!("  Strict Annotations: {}", config.report.strict_annotations);
        println!("  Patient: {}", config.patient.name);
        println!("  File Logging: {}", config.logging.local_enabled);

        if self.check_dataset {
            println!();
            match load_dataset(&config.dataset) {
                Ok(dataset) => {
                    println!("✅ Dataset loaded: {} variants", dataset.len());
                }
                Err(e) => {
                    println!("❌ Failed to load dataset");
                    println!("   Error: {e}");
                    println!();
                    return Ok(2);
                }
            }
        }

        println!();
        Ok(0)
    }
}
