//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the variant report
//! service using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Variant Report - ACMG variant report service
#[derive(Parser, Debug)]
#[command(name = "variant-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "variant-report.toml",
        env = "VARIANT_REPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VARIANT_REPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP report service
    Serve(commands::serve::ServeArgs),

    /// Generate a report for a single variant
    Report(commands::report::ReportArgs),

    /// Generate the variant list for an effect tag
    List(commands::list::ListArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::ReportFormat;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["variant-report", "serve"]);
        assert_eq!(cli.config, "variant-report.toml");
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "variant-report",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["variant-report", "--config", "custom.toml", "serve"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["variant-report", "--log-level", "debug", "serve"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::parse_from([
            "variant-report",
            "report",
            "--variant",
            "1_100_A/G",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.variant, "1_100_A/G");
                assert_eq!(args.format, ReportFormat::Json);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_report_defaults_to_pdf() {
        let cli = Cli::parse_from(["variant-report", "report", "--variant", "rs1"]);
        match cli.command {
            Commands::Report(args) => assert_eq!(args.format, ReportFormat::Pdf),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "variant-report",
            "report",
            "--variant",
            "rs1",
            "--format",
            "docx",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["variant-report", "list", "--effect", "Benign"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["variant-report", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["variant-report", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
