//! Integration tests for GET /api/presets.

mod common;

use common::{assert_ok, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_lists_presets_in_order() {
    let app = TestApp::new();

    let response = app.get("/api/presets").await;

    assert_ok(&response);
    let presets: Vec<serde_json::Value> = response.json();
    let keys: Vec<&str> = presets.iter().map(|p| p["key"].as_str().unwrap()).collect();
    assert_eq!(
        keys,
        vec!["default", "protanopia", "deuteranopia", "tritanopia", "reading"]
    );
}

#[tokio::test]
async fn test_preset_fields() {
    let app = TestApp::new();

    let presets: Vec<serde_json::Value> = app.get("/api/presets").await.json();
    let tritanopia = &presets[3];

    assert_eq!(tritanopia["label"], "Tritanopia (Blue-blind)");
    assert_eq!(
        tritanopia["description"],
        "Blue color deficiency - enhances blue perception"
    );
    assert_eq!(tritanopia["settings"]["hue"], 270);
    assert_eq!(tritanopia["settings"]["invert"], false);
    assert_eq!(tritanopia["settings"]["sepia"], false);
    assert_eq!(tritanopia["settings"]["reading_mode"], false);
    let contrast = tritanopia["settings"]["contrast"].as_f64().unwrap();
    assert!((contrast - 1.6).abs() < 1e-6);

    assert_eq!(presets[4]["settings"]["reading_mode"], true);
}
