//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::models::{AppConfig, CorsConfig};
use crate::services::{FetchError, HttpFetcher, ImageFetch, ImageProcessor};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub processor: Arc<ImageProcessor>,
}

/// Create application state with the HTTP fetcher from `config`.
pub fn create_app_state(config: AppConfig) -> Result<AppState, FetchError> {
    let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
    Ok(create_app_state_with_fetcher(config, fetcher))
}

/// Create application state around any fetcher.
pub fn create_app_state_with_fetcher(config: AppConfig, fetcher: Arc<dyn ImageFetch>) -> AppState {
    AppState {
        config: Arc::new(config),
        processor: Arc::new(ImageProcessor::new(fetcher)),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/process_image", post(handle_process_image))
        .route("/api/filter", post(handle_filter))
        .route("/api/presets", get(api::handle_presets))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The browser extension calls from whatever page it runs on
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_process_image(
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<axum::Json<api::ProcessImageRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<axum::Json<api::ProcessedImageResponse>, crate::error::ApiError> {
    api::handle_process_image(axum::extract::State(state.processor), payload).await
}

async fn handle_filter(
    axum::extract::State(state): axum::extract::State<AppState>,
    payload: Result<axum::Json<api::FilterRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<axum::Json<api::ProcessedImageResponse>, crate::error::ApiError> {
    api::handle_filter(axum::extract::State(state.processor), payload).await
}
