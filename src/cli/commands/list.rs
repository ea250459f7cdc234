//! List command implementation
//!
//! Generates the variant list PDF for an effect tag without running the
//! server.

use super::{load_config_or_report, offline_coordinator, report_failure};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Effect tag to match, or `all`
    #[arg(short, long)]
    pub effect: String,

    /// Also write the PDF to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let effect = self.effect.trim().to_lowercase();
        tracing::info!(effect = %effect, "Starting list command");

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

        let generated = match tokio::task::block_in_place(|| coordinator.variant_list_pdf(&effect))
        {
            Ok(g) => g,
            Err(e) => return report_failure(e),
        };

        println!("✅ Variant list generated: {}", generated.path.display());
        if let Some(path) = &self.output {
            fs::write(path, &generated.bytes)?;
            println!("   Copied to {}", path.display());
        }

        Ok(0)
    }
}
