//! Request handlers
//!
//! Both report endpoints take a JSON body. PDF rendering runs on the blocking
//! pool; the response carries the bytes that were just written to the output
//! directory.

use super::error::ApiError;
use super::state::AppState;
use crate::core::coordinator::GeneratedReport;
use crate::core::report::{ReportFormat, INVALID_FORMAT};
use crate::domain::errors::ReportError;
use crate::domain::patient::PatientInfo;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

pub const NOT_JSON: &str = "Request must be in JSON format.";
pub const VARIANT_REQUIRED: &str = "Variant name is required.";
pub const EFFECT_REQUIRED: &str = "Field 'effect' is required in the JSON body.";
pub const INVALID_BODY: &str = "Invalid request body.";

/// Body of `POST /generate_report`
///
/// `variant` and `format` are kept as raw JSON so a present `null` or
/// non-string value can be told apart from an absent key.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(default, deserialize_with = "present")]
    pub variant: Option<Value>,

    /// `pdf` (default) or `json`
    #[serde(default, deserialize_with = "present")]
    pub format: Option<Value>,

    /// Overrides the configured patient details
    #[serde(default)]
    pub patient: Option<PatientInfo>,
}

impl GenerateReportRequest {
    /// Non-empty variant identifier
    pub fn variant(&self) -> Result<&str, ReportError> {
        match &self.variant {
            Some(Value::String(variant)) if !variant.is_empty() => Ok(variant),
            _ => Err(ReportError::Validation(VARIANT_REQUIRED.to_string())),
        }
    }

    /// Requested format; only an absent key takes the default
    pub fn format(&self) -> Result<ReportFormat, ReportError> {
        match &self.format {
            None => Ok(ReportFormat::default()),
            Some(Value::String(format)) => format.parse(),
            Some(_) => Err(ReportError::Validation(INVALID_FORMAT.to_string())),
        }
    }
}

/// Body of `POST /generate_variant_list`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateVariantListRequest {
    #[serde(default, deserialize_with = "present")]
    pub effect: Option<Value>,
}

impl GenerateVariantListRequest {
    /// Effect tag, trimmed and lower-cased
    pub fn effect(&self) -> Result<String, ReportError> {
        match &self.effect {
            Some(Value::String(effect)) => Ok(effect.trim().to_lowercase()),
            _ => Err(ReportError::Validation(EFFECT_REQUIRED.to_string())),
        }
    }
}

/// Keeps a present key as `Some`, `null` included
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// `POST /generate_report`
pub async fn generate_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    handle_report(state, &headers, &body)
        .await
        .map_err(ApiError::report)
}

async fn handle_report(
    state: AppState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Response, ReportError> {
    let request: GenerateReportRequest = parse_json_body(headers, body)?;

    let variant = request.variant()?.to_string();
    let format = request.format()?;

    tracing::info!(variant = %variant, format = %format, "Report requested");

    match format {
        ReportFormat::Json => {
            let report = state
                .coordinator
                .json_report(&variant, request.patient.as_ref())?;
            Ok(Json(report).into_response())
        }
        ReportFormat::Pdf => {
            let coordinator = state.coordinator.clone();
            let patient = request.patient;
            let generated = tokio::task::spawn_blocking(move || {
                coordinator.pdf_report(&variant, patient.as_ref())
            })
            .await
            .map_err(|e| ReportError::Other(format!("Report task failed: {e}")))??;
            attachment(generated)
        }
    }
}

/// `POST /generate_variant_list`
pub async fn generate_variant_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    handle_variant_list(state, &headers, &body)
        .await
        .map_err(ApiError::variant_list)
}

async fn handle_variant_list(
    state: AppState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Response, ReportError> {
    tracing::debug!(
        body = %String::from_utf8_lossy(body),
        "Variant list body received"
    );

    let request: GenerateVariantListRequest = parse_json_body(headers, body)?;
    let effect = request.effect()?;

    tracing::info!(effect = %effect, "Variant list requested");

    let coordinator = state.coordinator.clone();
    let generated = tokio::task::spawn_blocking(move || coordinator.variant_list_pdf(&effect))
        .await
        .map_err(|e| ReportError::Other(format!("Variant list task failed: {e}")))??;
    attachment(generated)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "variants": state.coordinator.dataset().len(),
    }))
}

/// Parses a JSON request body
///
/// The content type must be JSON. A `null` or non-object body yields the
/// request's defaults, so the missing-field checks report it.
fn parse_json_body<T: DeserializeOwned + Default>(
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<T, ReportError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            let mime = v.split(';').next().unwrap_or("").trim().to_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        });
    if !is_json {
        return Err(ReportError::Validation(NOT_JSON.to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ReportError::Validation(NOT_JSON.to_string()))?;
    if !value.is_object() {
        return Ok(T::default());
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "Request body rejected");
        ReportError::Validation(INVALID_BODY.to_string())
    })
}

fn attachment(generated: GeneratedReport) -> Result<Response, ReportError> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        generated.file_name
    ))
    .map_err(|e| ReportError::Other(format!("Invalid file name header: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        generated.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    fn report_request(body: &'static [u8]) -> GenerateReportRequest {
        parse_json_body(&json_headers(), &Bytes::from_static(body)).unwrap()
    }

    #[test]
    fn test_parse_json_body() {
        let request = report_request(br#"{"variant": "rs1", "format": "json"}"#);
        assert_eq!(request.variant().unwrap(), "rs1");
        assert_eq!(request.format().unwrap(), ReportFormat::Json);
        assert!(request.patient.is_none());
    }

    #[test]
    fn test_absent_format_defaults_to_pdf() {
        let request = report_request(br#"{"variant": "rs1"}"#);
        assert_eq!(request.format().unwrap(), ReportFormat::Pdf);
    }

    #[test]
    fn test_null_or_non_string_format_is_invalid() {
        for body in [
            br#"{"variant": "rs1", "format": null}"#.as_slice(),
            br#"{"variant": "rs1", "format": 1}"#.as_slice(),
            br#"{"variant": "rs1", "format": ["pdf"]}"#.as_slice(),
        ] {
            let request: GenerateReportRequest =
                parse_json_body(&json_headers(), &Bytes::copy_from_slice(body)).unwrap();
            let err = request.format().unwrap_err();
            assert_eq!(err.client_message().as_deref(), Some(INVALID_FORMAT));
        }
    }

    #[test]
    fn test_non_string_variant_is_required_message() {
        for body in [
            br#"{"variant": 123}"#.as_slice(),
            br#"{"variant": null}"#.as_slice(),
            br#"{"variant": ""}"#.as_slice(),
        ] {
            let request: GenerateReportRequest =
                parse_json_body(&json_headers(), &Bytes::copy_from_slice(body)).unwrap();
            let err = request.variant().unwrap_err();
            assert_eq!(err.client_message().as_deref(), Some(VARIANT_REQUIRED));
        }
    }

    #[test]
    fn test_effect_is_normalized() {
        let body = Bytes::from_static(br#"{"effect": "  Likely Benign "}"#);
        let request: GenerateVariantListRequest = parse_json_body(&json_headers(), &body).unwrap();
        assert_eq!(request.effect().unwrap(), "likely benign");
    }

    #[test]
    fn test_non_string_effect_is_required_message() {
        let body = Bytes::from_static(br#"{"effect": 5}"#);
        let request: GenerateVariantListRequest = parse_json_body(&json_headers(), &body).unwrap();
        let err = request.effect().unwrap_err();
        assert_eq!(err.client_message().as_deref(), Some(EFFECT_REQUIRED));
    }

    #[test]
    fn test_invalid_patient_hides_serde_details() {
        let body = Bytes::from_static(br#"{"variant": "rs1", "patient": 7}"#);
        let err = parse_json_body::<GenerateReportRequest>(&json_headers(), &body).unwrap_err();
        assert_eq!(err.client_message().as_deref(), Some(INVALID_BODY));
    }

    #[test]
    fn test_parse_json_body_requires_json_content_type() {
        let body = Bytes::from_static(br#"{"effect": "benign"}"#);
        let err = parse_json_body::<GenerateVariantListRequest>(&HeaderMap::new(), &body)
            .unwrap_err();
        assert_eq!(err.client_message().as_deref(), Some(NOT_JSON));
    }

    #[test]
    fn test_parse_json_body_rejects_malformed_json() {
        let body = Bytes::from_static(b"effect=benign");
        let result = parse_json_body::<GenerateVariantListRequest>(&json_headers(), &body);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_null_body_yields_defaults() {
        let body = Bytes::from_static(b"null");
        let request: GenerateVariantListRequest =
            parse_json_body(&json_headers(), &body).unwrap();
        assert!(request.effect.is_none());
    }
}
