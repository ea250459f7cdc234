//! Domain error types
//!
//! This module defines the error hierarchy for the variant report service.
//! Client-fault errors carry a message that is safe to return to callers;
//! everything else is a server fault and is reported opaquely.

use thiserror::Error;

/// Main report error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing or invalid request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// No dataset row matches the requested variant
    #[error("Variant {0} not found in the dataset.")]
    VariantNotFound(String),

    /// No dataset row matches the requested effect tag
    #[error("No variants found for effectid_5cls: {0}.")]
    EffectNotFound(String),

    /// Malformed ACMG annotation (strict mode only)
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dataset loading errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Document rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ReportError {
    /// Whether the error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReportError::Validation(_)
                | ReportError::VariantNotFound(_)
                | ReportError::EffectNotFound(_)
        )
    }

    /// Message that may be shown to the caller, `None` for server faults
    pub fn client_message(&self) -> Option<String> {
        match self {
            ReportError::Validation(msg) => Some(msg.clone()),
            ReportError::VariantNotFound(_) | ReportError::EffectNotFound(_) => {
                Some(self.to_string())
            }
            _ => None,
        }
    }
}

/// Reasons an annotation token is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Token lacks one of `:`, `(` or `)`
    MissingDelimiter,
    /// No `": "` between key and value
    MissingKeySeparator,
    /// No `" ("` before the rationale
    MissingRationale,
    /// Rationale does not end with `)`
    UnterminatedRationale,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MalformedReason::MissingDelimiter => "expected ':', '(' and ')'",
            MalformedReason::MissingKeySeparator => "expected ': ' after the key",
            MalformedReason::MissingRationale => "expected ' (' before the rationale",
            MalformedReason::UnterminatedRationale => "rationale must end with ')'",
        };
        f.write_str(text)
    }
}

/// ACMG annotation parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// A token does not follow `KEY: VALUE (RATIONALE)`
    #[error("malformed token '{token}': {reason}")]
    MalformedToken {
        token: String,
        reason: MalformedReason,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Dataset(err.to_string())
    }
}
