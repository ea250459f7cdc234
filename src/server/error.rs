//! HTTP error responses
//!
//! Client faults are returned with their message; server faults are logged
//! in full and answered with a fixed, endpoint-specific message.

use crate::domain::errors::ReportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// 500 body for `/generate_report`
pub const REPORT_FAILURE: &str = "An error occurred while generating the report.";
/// 500 body for `/generate_variant_list`
pub const VARIANT_LIST_FAILURE: &str =
    "An error occurred while generating the variant list report.";

/// A [`ReportError`] bound to the endpoint it occurred in
#[derive(Debug)]
pub struct ApiError {
    error: ReportError,
    endpoint: &'static str,
    failure_message: &'static str,
}

impl ApiError {
    /// Error raised by `/generate_report`
    pub fn report(error: ReportError) -> Self {
        Self {
            error,
            endpoint: "/generate_report",
            failure_message: REPORT_FAILURE,
        }
    }

    /// Error raised by `/generate_variant_list`
    pub fn variant_list(error: ReportError) -> Self {
        Self {
            error,
            endpoint: "/generate_variant_list",
            failure_message: VARIANT_LIST_FAILURE,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            ReportError::Validation(_) => StatusCode::BAD_REQUEST,
            ReportError::VariantNotFound(_) | ReportError::EffectNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.error.client_message() {
            Some(message) => {
                tracing::warn!(
                    endpoint = self.endpoint,
                    status = status.as_u16(),
                    error = %self.error,
                    "Request rejected"
                );
                message
            }
            None => {
                crate::log_error_with_context!(&self.error, self.endpoint);
                self.failure_message.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
