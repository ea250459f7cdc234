//! External integrations
//!
//! - [`dataset`] - CSV/TSV variant dataset loading
//! - [`pdf`] - PDF rendering with printpdf
//! - [`storage`] - Generated report files

pub mod dataset;
pub mod pdf;
pub mod storage;
