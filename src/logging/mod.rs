//! Logging and observability
//!
//! Structured logging via `tracing`:
//! - Console output with configurable level
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use variant_report::logging::init_logging;
//! use variant_report::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a generated report
///
/// # Example
///
/// ```no_run
/// use variant_report::log_report_generated;
/// use std::path::Path;
/// use std::time::Duration;
///
/// let path = Path::new("generated_reports/1_100_A_G_report.pdf");
/// log_report_generated!("1_100_A/G", path, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_report_generated {
    ($variant:expr, $path:expr, $duration:expr) => {
        tracing::info!(
            variant = %$variant,
            path = %$path.display(),
            duration_ms = $duration.as_millis() as u64,
            "Report generated"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use variant_report::log_error_with_context;
/// use variant_report::domain::ReportError;
///
/// let error = ReportError::Render("font missing".to_string());
/// log_error_with_context!(&error, "/generate_report");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
