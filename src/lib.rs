// Variant Report - ACMG variant report service
// Copyright (c) 2025 Variant Report Contributors
// Licensed under the MIT License

//! # Variant Report - ACMG variant report service
//!
//! Variant Report turns a table of annotated genomic variants into
//! patient-facing reports: a structured JSON document or a PDF, plus
//! per-effect variant lists.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Parsing** ACMG criteria annotations into readable bullet lines
//! - **Looking up** variants and filtering them by effect class
//! - **Assembling** JSON reports and PDF documents
//! - **Serving** both over HTTP
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP endpoints
//! - [`core`] - Business logic (annotations, dataset queries, report layout)
//! - [`adapters`] - Dataset loading, PDF rendering, report storage
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use variant_report::adapters::dataset::load_dataset;
//! use variant_report::config::load_config;
//! use variant_report::core::ReportCoordinator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("variant-report.toml")?;
//!     let dataset = load_dataset(&config.dataset)?;
//!
//!     let coordinator =
//!         ReportCoordinator::new(Arc::new(dataset), &config.report, config.patient.clone());
//!
//!     let report = coordinator.json_report("1_100_A/G", None)?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```
//!
//! ## ACMG Annotations
//!
//! Criteria are stored as `KEY: VALUE (RATIONALE)` tokens joined by `", "`:
//!
//! ```rust
//! use variant_report::core::annotation;
//!
//! let entries = annotation::parse("PVS1: Very Strong (Null variant), PM2: Moderate (Absent)");
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].key, "PVS1");
//! assert_eq!(entries[1].rationale, "Absent");
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], an alias over
//! [`domain::ReportError`]. Lookups that match nothing are distinct variants
//! so callers can tell them apart from server faults:
//!
//! ```rust
//! use variant_report::core::Dataset;
//! use variant_report::domain::{ReportError, VariantRecord};
//!
//! let dataset = Dataset::new(vec![VariantRecord::new("1_100_A/G")]);
//! assert!(dataset.lookup("1_100_A/G").is_ok());
//! assert!(matches!(
//!     dataset.lookup("2_200_C/T"),
//!     Err(ReportError::VariantNotFound(_))
//! ));
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
