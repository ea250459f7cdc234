//! Core business logic
//!
//! - [`annotation`] - ACMG criteria parsing and rendering
//! - [`dataset`] - In-memory dataset lookup and effect listing
//! - [`report`] - Structured (JSON) report assembly
//! - [`document`] - Layout blocks for rendered reports
//! - [`coordinator`] - Per-request orchestration over the shared dataset

pub mod annotation;
pub mod coordinator;
pub mod dataset;
pub mod document;
pub mod report;

pub use coordinator::{GeneratedReport, ReportCoordinator};
pub use dataset::Dataset;
