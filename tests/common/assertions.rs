//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response carries the status in its JSON body too
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(
        json["error"].as_str().is_some_and(|e| !e.is_empty()),
        "Missing error message: {json}"
    );
}

/// Assert the risk label and progression of one result
pub fn assert_result(report: &Value, label: &str, risk: &str, percent: u64) {
    let result = &report["results"][label];
    assert!(
        result.is_object(),
        "No result for {label}: {}",
        serde_json::to_string_pretty(&report["results"]).unwrap()
    );
    assert_eq!(result["risk_label"].as_str(), Some(risk), "risk of {label}");
    assert_eq!(
        result["progression_percent"].as_u64(),
        Some(percent),
        "progression of {label}"
    );
}
