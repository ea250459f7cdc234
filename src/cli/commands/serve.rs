//! Serve command implementation
//!
//! Runs the HTTP report service until a shutdown signal arrives.

use super::load_config_or_report;
use crate::adapters::dataset::load_dataset_or_empty;
use crate::core::coordinator::ReportCoordinator;
use crate::server::{self, AppState};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting serve command");

        let Some(mut config) = load_config_or_report(config_path) else {
            return Ok(2);
        };

        if let Some(host) = &self.host {
            tracing::info!(host = %host, "Overriding bind host from CLI");
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            tracing::info!(port = port, "Overriding bind port from CLI");
            config.server.port = port;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let dataset = load_dataset_or_empty(&config.dataset);
        let variants = dataset.len();
        let coordinator =
            ReportCoordinator::new(Arc::new(dataset), &config.report, config.patient.clone());

        println!("🧬 Variant report service");
        println!("   Dataset: {} ({variants} variants)", config.dataset.path);
        println!("   Reports: {}", config.report.output_dir);
        println!("   Listening on http://{}", config.server.bind_address());
        println!();

        server::serve(&config.server, AppState::new(coordinator), shutdown_signal).await?;

        println!("✅ Server stopped");
        Ok(0)
    }
}
