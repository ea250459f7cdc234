//! End-to-end tests for the HTTP endpoints
//!
//! Requests are driven through the axum router with `oneshot`; generated
//! PDFs land in a temporary output directory.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use variant_report::config::ReportConfig;
use variant_report::core::{Dataset, ReportCoordinator};
use variant_report::domain::{PatientInfo, VariantRecord};
use variant_report::server::{router, AppState};

fn dataset() -> Dataset {
    Dataset::new(vec![
        VariantRecord::new("17_43045712_G/A")
            .with_nomenclature("BRCA1:c.5266dupC")
            .with_zygosity("Heterozygous")
            .with_effect_class("Pathogenic")
            .with_acmg_criteria(
                "PVS_score: Strong (Null variant), PM2_score: Moderate (Absent from gnomAD)",
            )
            .with_summary("Frameshift variant in BRCA1.")
            .with_method("DNA extraction. Library preparation. Sequencing")
            .with_recommendation("Refer to genetic counselling."),
        VariantRecord::new("2_200_C/T")
            .with_effect_class("benign")
            .with_acmg_criteria("not an annotation"),
        VariantRecord::new("3_300_T/C"),
    ])
}

struct TestApp {
    router: Router,
    output_dir: TempDir,
}

fn app_with(strict_annotations: bool) -> TestApp {
    let output_dir = TempDir::new().unwrap();
    let config = ReportConfig {
        output_dir: output_dir.path().to_string_lossy().to_string(),
        version_label: Some("v1.0.0 (January 2025)".to_string()),
        strict_annotations,
        ..ReportConfig::default()
    };
    let coordinator =
        ReportCoordinator::new(Arc::new(dataset()), &config, PatientInfo::default());

    TestApp {
        router: router(AppState::new(coordinator), true),
        output_dir,
    }
}

fn app() -> TestApp {
    app_with(false)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_json_report() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_report",
            json!({"variant": "17_43045712_G/A", "format": "json"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["variant"], "17_43045712_G/A");
    assert_eq!(
        json["acmg_interpretation"],
        "PVS_score: Strong (Null variant)\nPM2_score: Moderate (Absent from gnomAD)"
    );
    assert_eq!(json["executive_summary"], "Frameshift variant in BRCA1.");
    assert_eq!(
        json["interpretation_table"]["variant_detail"],
        "BRCA1:c.5266dupC"
    );
    assert_eq!(json["patient_info"]["Name"], "John Doe");
    assert_eq!(json["methods"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_json_report_fallbacks() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_report",
            json!({"variant": "3_300_T/C", "format": "json"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["acmg_interpretation"],
        "No ACMG interpretation available."
    );
    assert_eq!(json["executive_summary"], "No explanation available.");
    assert_eq!(json["testing_material_and_methods"], "No Methods available");
}

#[tokio::test]
async fn test_json_report_patient_override() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_report",
            json!({
                "variant": "17_43045712_G/A",
                "format": "json",
                "patient": {"name": "Jane Roe", "sex": "Female"}
            }),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["patient_info"]["Name"], "Jane Roe");
    assert_eq!(json["patient_info"]["Sex"], "Female");
    assert_eq!(json["patient_info"]["Date of Birth"], "12/01/1987");
}

#[tokio::test]
async fn test_pdf_report_is_default_format() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_report",
            json!({"variant": "17_43045712_G/A"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"17_43045712_G_A_report.pdf\""
    );

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
    assert!(app
        .output_dir
        .path()
        .join("17_43045712_G_A_report.pdf")
        .exists());
}

#[tokio::test]
async fn test_unknown_variant_is_not_found() {
    for format in ["json", "pdf"] {
        let app = app();
        let response = app
            .router
            .oneshot(post_json(
                "/generate_report",
                json!({"variant": "9_999_A/T", "format": format}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Variant 9_999_A/T not found in the dataset.");
    }
}

#[tokio::test]
async fn test_missing_variant_is_bad_request() {
    for body in [
        json!({"format": "json"}),
        json!({"variant": ""}),
        json!({"variant": 123}),
        json!({"variant": null}),
    ] {
        let app = app();
        let response = app
            .router
            .oneshot(post_json("/generate_report", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Variant name is required.");
    }
}

#[tokio::test]
async fn test_invalid_format_is_bad_request() {
    for format in [json!("docx"), Value::Null, json!(1)] {
        let app = app();
        let response = app
            .router
            .oneshot(post_json(
                "/generate_report",
                json!({"variant": "17_43045712_G/A", "format": format}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "Invalid format. Supported formats are 'pdf' and 'json'."
        );
    }
}

#[tokio::test]
async fn test_invalid_patient_is_generic_bad_request() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_report",
            json!({"variant": "17_43045712_G/A", "patient": 7}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid request body.");
}

#[tokio::test]
async fn test_strict_annotations_fail_as_server_error() {
    let app = app_with(true);
    let response = app
        .router
        .oneshot(post_json(
            "/generate_report",
            json!({"variant": "2_200_C/T", "format": "json"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "An error occurred while generating the report."
    );
}

#[tokio::test]
async fn test_variant_list_by_effect() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_variant_list",
            json!({"effect": "  PATHOGENIC "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"pathogenic_variants_report.pdf\""
    );
    assert!(body_bytes(response).await.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_variant_list_all() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json("/generate_variant_list", json!({"effect": "All"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(app
        .output_dir
        .path()
        .join("all_variants_report.pdf")
        .exists());
}

#[tokio::test]
async fn test_variant_list_unknown_effect_is_not_found() {
    let app = app();
    let response = app
        .router
        .oneshot(post_json(
            "/generate_variant_list",
            json!({"effect": "likely benign"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "No variants found for effectid_5cls: likely benign."
    );
}

#[tokio::test]
async fn test_variant_list_requires_effect() {
    for body in [json!({}), json!({"effect": 5}), json!({"effect": null})] {
        let app = app();
        let response = app
            .router
            .oneshot(post_json("/generate_variant_list", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "Field 'effect' is required in the JSON body."
        );
    }
}

#[tokio::test]
async fn test_variant_list_requires_json_body() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/generate_variant_list")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("effect=benign"))
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Request must be in JSON format.");
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["variants"], 3);
}
