//! Integration tests for GET /v1/templates and /health.

mod common;

use common::fixtures::labels;
use common::{assert_ok, TestApp};
use pretty_assertions::assert_eq;
use serde_json::Value;
use utoipa::OpenApi;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_templates_lists_embedded_templates() {
    let app = TestApp::new();

    let response = app.get("/v1/templates").await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["default_template"], "cardiometabolic-v1");

    let names: Vec<&str> = json["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["cardiometabolic-v1", "cardiometabolic-v1-fill"]);
}

#[tokio::test]
async fn test_template_summary_contents() {
    let app = TestApp::new();

    let json: Value = app.get("/v1/templates").await.json();
    let template = &json["templates"][0];

    assert_eq!(template["version"], 1);
    assert_eq!(template["nominal_dpi"], 300);
    assert_eq!(template["scale"], "hue");

    let pages = template["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0], serde_json::json!(labels::PAGE_ONE));
    assert_eq!(pages[1], serde_json::json!(labels::PAGE_TWO));

    assert_eq!(json["templates"][1]["scale"], "fill_percent");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let response = app.get("/v1/nothing-here").await;
    assert_eq!(response.status, axum::http::StatusCode::NOT_FOUND);
}

#[test]
fn test_openapi_documents_routes() {
    let doc = riskbar::api::ApiDoc::openapi();
    let paths: Vec<&String> = doc.paths.paths.keys().collect();

    assert!(paths.iter().any(|p| *p == "/v1/detect-risk-bars"));
    assert!(paths.iter().any(|p| *p == "/v1/templates"));
}
