use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use color_filters::{presets, FilterSettings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::process_image::{require_image_url, truncate_for_log};
use super::{ErrorResponse, ProcessedImageResponse};
use crate::error::ApiError;
use crate::services::{ImageProcessor, Operation, ProcessError};

/// Per-field overrides on top of a preset or the default settings
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SettingsOverrides {
    /// Contrast multiplier, above 0 (typically 1.0 to 2.0)
    pub contrast: Option<f32>,
    /// Hue rotation in degrees, 0 to 360
    pub hue: Option<u16>,
    pub invert: Option<bool>,
    /// Warm sepia tint, also accepted as `blue_light` / `blueLight`
    #[serde(alias = "blue_light", alias = "blueLight")]
    pub sepia: Option<bool>,
    #[serde(alias = "readingMode")]
    pub reading_mode: Option<bool>,
}

impl SettingsOverrides {
    pub fn apply_to(&self, base: FilterSettings) -> FilterSettings {
        FilterSettings {
            contrast: self.contrast.unwrap_or(base.contrast),
            hue: self.hue.unwrap_or(base.hue),
            invert: self.invert.unwrap_or(base.invert),
            sepia: self.sepia.unwrap_or(base.sepia),
            reading_mode: self.reading_mode.unwrap_or(base.reading_mode),
        }
    }
}

/// Request body for the filter pipeline
#[derive(Debug, Deserialize, ToSchema)]
pub struct FilterRequest {
    /// Image location: http(s) URL or base64 data URI
    #[serde(default)]
    pub image_url: Option<String>,
    /// Preset key or label to start from
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub settings: SettingsOverrides,
}

/// Filter settings as reported back to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SettingsBody {
    pub contrast: f32,
    pub hue: u16,
    pub invert: bool,
    pub sepia: bool,
    pub reading_mode: bool,
}

impl From<FilterSettings> for SettingsBody {
    fn from(s: FilterSettings) -> Self {
        Self {
            contrast: s.contrast,
            hue: s.hue,
            invert: s.invert,
            sepia: s.sepia,
            reading_mode: s.reading_mode,
        }
    }
}

/// Resolve the preset (if any) and overrides into one validated record.
pub fn resolve_settings(
    preset: Option<&str>,
    overrides: &SettingsOverrides,
) -> Result<FilterSettings, ApiError> {
    let base = match preset.map(str::trim).filter(|p| !p.is_empty()) {
        Some(name) => {
            presets::find(name)
                .ok_or_else(|| ApiError::UnknownPreset(name.to_string()))?
                .settings
        }
        None => FilterSettings::default(),
    };

    let settings = overrides.apply_to(base);
    settings.validate().map_err(ProcessError::from)?;
    Ok(settings)
}

/// Apply colour filters
///
/// Runs contrast, hue rotation, invert, sepia and reading mode in that
/// order. Start from a preset, override single fields, or both.
#[utoipa::path(
    post,
    path = "/api/filter",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Image filtered", body = ProcessedImageResponse),
        (status = 400, description = "Missing image URL, malformed body, unsupported location or invalid settings", body = ErrorResponse),
        (status = 404, description = "Unknown preset", body = ErrorResponse),
        (status = 422, description = "Image data could not be decoded", body = ErrorResponse),
        (status = 502, description = "Image could not be fetched", body = ErrorResponse),
    ),
    tag = "Images"
)]
pub async fn handle_filter(
    State(processor): State<Arc<ImageProcessor>>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<ProcessedImageResponse>, ApiError> {
    let Json(request) = payload?;
    let image_url = require_image_url(request.image_url)?;
    let settings = resolve_settings(request.preset.as_deref(), &request.settings)?;

    tracing::debug!(
        image_url = %truncate_for_log(&image_url),
        preset = ?request.preset,
        ?settings,
        "Filtering image"
    );

    let processed_image = processor
        .process_to_data_uri(&image_url, Operation::Filter(settings))
        .await?;

    Ok(Json(ProcessedImageResponse { processed_image }))
}
