use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ImageProcessor, Operation};

/// Request body for contrast enhancement
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessImageRequest {
    /// Image location: http(s) URL or base64 data URI
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Processed image, ready to drop into an `<img src>`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessedImageResponse {
    /// `data:image/png;base64,...`
    pub processed_image: String,
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Trimmed image location, or the missing-URL error for absent, null or blank values.
pub(crate) fn require_image_url(image_url: Option<String>) -> Result<String, ApiError> {
    match image_url {
        Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        _ => Err(ApiError::MissingImageUrl),
    }
}

/// Enhance image contrast
///
/// Equalizes the lightness histogram of the image in L*a*b* space. Colours
/// keep their hue; dim and washed-out images gain contrast. The browser
/// extension calls this for every image on a page.
#[utoipa::path(
    post,
    path = "/process_image",
    request_body = ProcessImageRequest,
    responses(
        (status = 200, description = "Image processed", body = ProcessedImageResponse),
        (status = 400, description = "Missing image URL, malformed body or unsupported location", body = ErrorResponse),
        (status = 422, description = "Image data could not be decoded", body = ErrorResponse),
        (status = 502, description = "Image could not be fetched", body = ErrorResponse),
    ),
    tag = "Images"
)]
pub async fn handle_process_image(
    State(processor): State<Arc<ImageProcessor>>,
    payload: Result<Json<ProcessImageRequest>, JsonRejection>,
) -> Result<Json<ProcessedImageResponse>, ApiError> {
    let Json(request) = payload?;
    let image_url = require_image_url(request.image_url)?;

    tracing::debug!(image_url = %truncate_for_log(&image_url), "Processing image");

    let processed_image = processor
        .process_to_data_uri(&image_url, Operation::Equalize)
        .await?;

    Ok(Json(ProcessedImageResponse { processed_image }))
}

/// Data URIs can be megabytes long; keep log lines short.
pub(crate) fn truncate_for_log(location: &str) -> &str {
    const MAX: usize = 96;
    if location.len() <= MAX {
        return location;
    }
    let mut end = MAX;
    while !location.is_char_boundary(end) {
        end -= 1;
    }
    &location[..end]
}
