//! CLI command implementations

pub mod init;
pub mod list;
pub mod report;
pub mod serve;
pub mod validate;

use crate::adapters::dataset::load_dataset;
use crate::config::{load_config, AppConfig};
use crate::core::coordinator::ReportCoordinator;
use crate::domain::errors::ReportError;
use std::sync::Arc;

/// Loads the configuration, printing the failure
///
/// `None` maps to the configuration error exit code.
pub(crate) fn load_config_or_report(config_path: &str) -> Option<AppConfig> {
    match load_config(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("❌ Failed to load configuration file: {config_path}");
            println!("   Error: {e}");
            println!("   Run `variant-report init` to create one");
            None
        }
    }
}

/// Loads the dataset and builds a coordinator for an offline command
pub(crate) fn offline_coordinator(config: &AppConfig) -> Result<ReportCoordinator, ReportError> {
    let dataset = load_dataset(&config.dataset)?;
    Ok(ReportCoordinator::new(
        Arc::new(dataset),
        &config.report,
        config.patient.clone(),
    ))
}

/// Exit code for a failed report command
///
/// Lookups that found nothing exit with 3; anything else is fatal.
pub(crate) fn report_failure(error: ReportError) -> anyhow::Result<i32> {
    match error {
        ReportError::VariantNotFound(_) | ReportError::EffectNotFound(_) => {
            println!("❌ {error}");
            Ok(3)
        }
        other => Err(other.into()),
    }
}
