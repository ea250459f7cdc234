//! Report command implementation
//!
//! Generates a single-variant report without running the server.

use super::{load_config_or_report, offline_coordinator, report_failure};
use crate::core::report::ReportFormat;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Variant identifier (the `Uploaded_variation` value)
    #[arg(short, long)]
    pub variant: String,

    /// Output format (pdf or json)
    #[arg(short, long, default_value = "pdf")]
    pub format: ReportFormat,

    /// Also write the report to this path
    ///
    /// JSON is printed to stdout when no path is given.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(variant = %self.variant, format = %self.format, "Starting report command");

        let Some(config) = load_config_or_report(config_path) else {
            return Ok(2);
        };

        let coordinator = match offline_coordinator(&config) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load dataset: {}", config.dataset.path);
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        match self.format {
            ReportFormat::Json => {
                let report = match coordinator.json_report(&self.variant, None) {
                    Ok(r) => r,
                    Err(e) => return report_failure(e),
                };
                let json = serde_json::to_string_pretty(&report)?;

                match &self.output {
                    Some(path) => {
                        fs::write(path, json)?;
                        println!("✅ Report written to {}", path.display());
                    }
                    None => println!("{json}"),
                }
            }
            ReportFormat::Pdf => {
                let generated = match tokio::task::block_in_place(|| {
                    coordinator.pdf_report(&self.variant, None)
                }) {
                    Ok(g) => g,
                    Err(e) => return report_failure(e),
                };

                println!("✅ Report generated: {}", generated.path.display());
                if let Some(path) = &self.output {
                    fs::write(path, &generated.bytes)?;
                    println!("   Copied to {}", path.display());
                }
            }
        }

        Ok(0)
    }
}
