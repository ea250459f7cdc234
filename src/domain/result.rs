//! Result type alias for the report service

use super::errors::ReportError;

/// Result type alias for report operations
///
/// # Examples
///
/// ```
/// use variant_report::domain::result::Result;
/// use variant_report::domain::errors::ReportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;
