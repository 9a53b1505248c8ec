use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{FetchError, ProcessError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image URL provided")]
    MissingImageUrl,

    #[error("{0}")]
    BadRequest(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImageUrl | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownPreset(_) => StatusCode::NOT_FOUND,
            ApiError::Process(e) => match e {
                ProcessError::Fetch(FetchError::InlineData(_)) => StatusCode::UNPROCESSABLE_ENTITY,
                // The caller named something we will not fetch
                ProcessError::Fetch(
                    FetchError::InvalidLocation(_) | FetchError::LocalPathsDisabled,
                ) => StatusCode::BAD_REQUEST,
                ProcessError::Fetch(_) => StatusCode::BAD_GATEWAY,
                ProcessError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ProcessError::Filter(_) => StatusCode::BAD_REQUEST,
                ProcessError::Encode(_) | ProcessError::Task(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
