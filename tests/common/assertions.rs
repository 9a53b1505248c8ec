//! Assertion helpers for tests.

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_filters::PixelGrid;
use pretty_assertions::assert_eq;

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

/// Assert an error response with the given status and exact message.
///
/// The body must be `{"error": message}` and nothing else.
pub fn assert_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json, serde_json::json!({ "error": message }));
}

/// Assert an error response with the given status, returning the message
pub fn assert_error_status(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    let object = json.as_object().expect("Expected JSON object");
    assert_eq!(object.len(), 1, "Expected only an error field: {json}");
    json["error"]
        .as_str()
        .expect("Expected error to be a string")
        .to_string()
}

/// Assert a processed-image response and decode the PNG inside it
pub fn assert_processed_image(response: &TestResponse) -> PixelGrid {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    let uri = json["processed_image"]
        .as_str()
        .expect("Expected processed_image to be a string");

    let payload = uri
        .strip_prefix("data:image/png;base64,")
        .unwrap_or_else(|| panic!("Expected PNG data URI, got {}", &uri[..uri.len().min(40)]));
    let png = STANDARD.decode(payload).expect("Invalid base64 payload");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    coloraid::services::codec::decode_image(&png).expect("Processed image is not decodable")
}
