//! Configuration management for the variant report service.
//!
//! # Overview
//!
//! The service uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VARIANT_REPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Bind address and CORS
//! - [`DatasetConfig`] - Variant dataset file and delimiter
//! - [`ReportConfig`] - Output directory, version label, logo, strict parsing
//! - `[patient]` - Patient details printed on reports
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5001
//!
//! [dataset]
//! path = "${VARIANT_DATA_DIR}/information_data_run10-13.csv"
//!
//! [report]
//! output_dir = "generated_reports"
//! logo_path = "asset/logo-bio.png"
//!
//! [patient]
//! name = "John Doe"
//! date_of_birth = "12/01/1987"
//! sex = "Male"
//! test_ordered_by = "Dr. Fulan, Amazing Hospital Centre"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    AppConfig, ApplicationConfig, DatasetConfig, LoggingConfig, ReportConfig, ServerConfig,
};
