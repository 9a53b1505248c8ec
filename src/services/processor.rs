use color_filters::{FilterError, FilterSettings, PixelGrid};
use std::sync::Arc;
use thiserror::Error;

use crate::services::codec::{self, DecodeError, EncodeError};
use crate::services::fetcher::{FetchError, ImageFetch};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to fetch image: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid filter input: {0}")]
    Filter(#[from] FilterError),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Processing task failed: {0}")]
    Task(String),
}

/// What to do with a decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Lightness histogram equalization only
    Equalize,
    /// The full filter pipeline
    Filter(FilterSettings),
}

impl Operation {
    pub fn run(&self, grid: &PixelGrid) -> Result<PixelGrid, FilterError> {
        match self {
            Operation::Equalize => color_filters::equalize_contrast(grid),
            Operation::Filter(settings) => color_filters::apply(grid, settings),
        }
    }
}

/// Decode, filter and re-encode one image.
///
/// Pure and synchronous; callers on an async runtime go through
/// [`ImageProcessor`].
pub fn process_bytes(bytes: &[u8], operation: Operation) -> Result<Vec<u8>, ProcessError> {
    let grid = codec::decode_image(bytes)?;
    let processed = operation.run(&grid)?;
    Ok(codec::encode_png(&processed)?)
}

/// Fetch-to-PNG service shared by the HTTP handlers and the CLI
pub struct ImageProcessor {
    fetcher: Arc<dyn ImageFetch>,
}

impl ImageProcessor {
    pub fn new(fetcher: Arc<dyn ImageFetch>) -> Self {
        Self { fetcher }
    }

    /// Fetch an image and return the processed PNG bytes.
    ///
    /// Decoding, filtering and encoding run under `spawn_blocking` so large
    /// images do not stall the async runtime.
    pub async fn process(&self, location: &str, operation: Operation) -> Result<Vec<u8>, ProcessError> {
        if let Operation::Filter(settings) = &operation {
            settings.validate()?;
        }

        let bytes = self.fetcher.fetch(location).await?;
        let input_len = bytes.len();

        let png = tokio::task::spawn_blocking(move || process_bytes(&bytes, operation))
            .await
            .map_err(|e| ProcessError::Task(e.to_string()))??;

        tracing::info!(
            input_bytes = input_len,
            output_bytes = png.len(),
            operation = ?operation,
            "Processed image"
        );
        Ok(png)
    }

    /// Same as [`process`](Self::process), wrapped as a PNG data URI.
    pub async fn process_to_data_uri(
        &self,
        location: &str,
        operation: Operation,
    ) -> Result<String, ProcessError> {
        let png = self.process(location, operation).await?;
        Ok(codec::png_data_uri(&png))
    }
}
