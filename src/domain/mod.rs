//! Domain models and types for the variant report service.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Dataset rows** ([`VariantRecord`]) and effect listings ([`EffectListing`])
//! - **Patient details** ([`PatientInfo`]) printed on every report
//! - **Error types** ([`ReportError`], [`AnnotationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ReportError>`]:
//!
//! ```rust
//! use variant_report::domain::{ReportError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(ReportError::VariantNotFound("rs123".to_string()))
//! }
//! ```

pub mod errors;
pub mod patient;
pub mod result;
pub mod variant;

// Re-export commonly used types for convenience
pub use errors::{AnnotationError, MalformedReason, ReportError};
pub use patient::PatientInfo;
pub use result::Result;
pub use variant::{EffectListing, VariantRecord};
