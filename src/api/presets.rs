use axum::Json;
use color_filters::presets;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::SettingsBody;

/// A named starting point for the filter pipeline
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PresetResponse {
    /// Lookup key for `/api/filter`
    pub key: String,
    pub label: String,
    pub description: String,
    pub settings: SettingsBody,
}

/// List filter presets
///
/// Returns the built-in presets for common colour-vision deficiencies, in
/// display order.
#[utoipa::path(
    get,
    path = "/api/presets",
    responses(
        (status = 200, description = "Available presets", body = [PresetResponse]),
    ),
    tag = "Presets"
)]
pub async fn handle_presets() -> Json<Vec<PresetResponse>> {
    Json(
        presets::all()
            .iter()
            .map(|p| PresetResponse {
                key: p.key.to_string(),
                label: p.label.to_string(),
                description: p.description.to_string(),
                settings: p.settings.into(),
            })
            .collect(),
    )
}
