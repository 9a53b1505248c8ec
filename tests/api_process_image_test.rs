//! Integration tests for POST /process_image.

mod common;

use axum::http::StatusCode;
use common::fixtures::{dim_ramp, png_bytes, png_data_uri, white};
use common::{assert_error, assert_error_status, assert_processed_image, MockHttpServer, TestApp};
use coloraid::models::AppConfig;

#[tokio::test]
async fn test_empty_body_is_missing_url() {
    let app = TestApp::new();

    let response = app.post_json("/process_image", "{}").await;

    assert_error(&response, StatusCode::BAD_REQUEST, "No image URL provided");
}

#[tokio::test]
async fn test_null_and_blank_url_are_missing() {
    let app = TestApp::new();

    let response = app
        .post_json("/process_image", r#"{"image_url": null}"#)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "No image URL provided");

    let response = app
        .post_json("/process_image", r#"{"image_url": "   "}"#)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "No image URL provided");
}

#[tokio::test]
async fn test_malformed_json() {
    let app = TestApp::new();

    let response = app.post_json("/process_image", "{not json").await;

    let message = assert_error_status(&response, StatusCode::BAD_REQUEST);
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_wrong_url_type() {
    let app = TestApp::new();

    let response = app.post_json("/process_image", r#"{"image_url": 42}"#).await;

    assert_error_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_equalizes_fetched_image() {
    let mock = MockHttpServer::start().await;
    mock.mock_png("/dim.png", png_bytes(&dim_ramp())).await;
    let app = TestApp::new();

    let response = app.process_image(&mock.url_for("/dim.png")).await;

    let out = assert_processed_image(&response);
    assert_eq!(out.dimensions(), (4, 1));
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(out.get_pixel(3, 0).0, [255, 255, 255]);

    let levels: Vec<u8> = (0..4).map(|x| out.get_pixel(x, 0).0[0]).collect();
    assert!(levels.windows(2).all(|w| w[0] < w[1]), "not stretched: {levels:?}");
}

#[tokio::test]
async fn test_uniform_image_is_unchanged() {
    let app = TestApp::new();

    let response = app.process_image(&png_data_uri(&white())).await;

    assert_eq!(assert_processed_image(&response), white());
}

#[tokio::test]
async fn test_upstream_error_is_bad_gateway() {
    let mock = MockHttpServer::start().await;
    mock.mock_error("/missing.png", 404).await;
    let app = TestApp::new();

    let response = app.process_image(&mock.url_for("/missing.png")).await;

    let message = assert_error_status(&response, StatusCode::BAD_GATEWAY);
    assert!(message.contains("404"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_unreachable_host_is_bad_gateway() {
    let app = TestApp::new();

    // Port 1 on localhost refuses connections
    let response = app.process_image("http://127.0.0.1:1/image.png").await;

    assert_error_status(&response, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_undecodable_image() {
    let mock = MockHttpServer::start().await;
    mock.mock_bytes("/page.html", "text/html", b"<html></html>".to_vec())
        .await;
    let app = TestApp::new();

    let response = app.process_image(&mock.url_for("/page.html")).await;

    assert_error_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bad_data_uri() {
    let app = TestApp::new();

    let response = app.process_image("data:image/png;base64,%%%").await;

    assert_error_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_local_paths_rejected_by_default() {
    let app = TestApp::new();

    let response = app.process_image("/etc/passwd").await;

    let message = assert_error_status(&response, StatusCode::BAD_REQUEST);
    assert!(message.contains("Local file access is disabled"));
}

#[tokio::test]
async fn test_unsupported_scheme_is_bad_request() {
    let app = TestApp::new();

    let response = app.process_image("ftp://example.com/image.png").await;

    let message = assert_error_status(&response, StatusCode::BAD_REQUEST);
    assert!(message.contains("ftp"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_uppercase_data_uri_is_accepted() {
    let app = TestApp::new();
    let uri = png_data_uri(&white()).replacen("data:", "DATA:", 1).replace(";base64", ";BASE64");

    let response = app.process_image(&uri).await;

    assert_eq!(assert_processed_image(&response), white());
}

#[tokio::test]
async fn test_oversized_image() {
    let mock = MockHttpServer::start().await;
    mock.mock_png("/big.png", png_bytes(&dim_ramp())).await;

    let mut config = AppConfig::default();
    config.fetch.max_image_bytes = 16;
    let app = TestApp::with_config(config);

    let response = app.process_image(&mock.url_for("/big.png")).await;

    let message = assert_error_status(&response, StatusCode::BAD_GATEWAY);
    assert!(message.contains("too large"), "unexpected message: {message}");
}
