//! Turning an image location into encoded image bytes.
//!
//! Accepted locations:
//! - `http://` and `https://` URLs
//! - `data:<mime>;base64,<payload>` URIs
//! - local paths and `file://` URLs, only when `allow_local_paths` is set

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::models::FetchConfig;
use crate::services::codec::{decode_data_uri, DecodeError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid image location: {0}")]
    InvalidLocation(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Image too large: more than {max} bytes")]
    TooLarge { max: u64 },

    #[error("Local file access is disabled")]
    LocalPathsDisabled,

    #[error("{0}")]
    InlineData(#[from] DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of encoded image bytes.
///
/// The HTTP service and the CLI share one implementation; tests substitute
/// their own.
#[async_trait]
pub trait ImageFetch: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

enum Location<'a> {
    Http(&'a str),
    DataUri(&'a str),
    Local(PathBuf),
}

fn classify(location: &str) -> Result<Location<'_>, FetchError> {
    let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Location::Http(location))
    } else if lower.starts_with("data:") {
        Ok(Location::DataUri(location))
    } else if lower.starts_with("file://") {
        Ok(Location::Local(PathBuf::from(&location["file://".len()..])))
    } else if let Some((scheme, _)) = location.split_once("://") {
        Err(FetchError::InvalidLocation(format!(
            "unsupported scheme '{scheme}'"
        )))
    } else {
        Ok(Location::Local(PathBuf::from(location)))
    }
}

/// Fetches images over HTTP(S), from data URIs and, optionally, from disk.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: u64,
    allow_local_paths: bool,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_bytes: config.max_image_bytes,
            allow_local_paths: config.allow_local_paths,
        })
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(FetchError::TooLarge { max: self.max_bytes });
        }

        // Content-Length may be absent or wrong; enforce the limit while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(FetchError::TooLarge { max: self.max_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url = %url, bytes = body.len(), "Fetched image");
        Ok(body)
    }

    async fn fetch_local(&self, path: &Path) -> Result<Vec<u8>, FetchError> {
        if !self.allow_local_paths {
            return Err(FetchError::LocalPathsDisabled);
        }

        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() > self.max_bytes {
            return Err(FetchError::TooLarge { max: self.max_bytes });
        }

        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read local image");
        Ok(bytes)
    }
}

#[async_trait]
impl ImageFetch for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FetchError::InvalidLocation("empty location".to_string()));
        }

        match classify(location)? {
            Location::Http(url) => self.fetch_http(url).await,
            Location::DataUri(uri) => {
                let bytes = decode_data_uri(uri)?;
                if bytes.len() as u64 > self.max_bytes {
                    return Err(FetchError::TooLarge { max: self.max_bytes });
                }
                Ok(bytes)
            }
            Location::Local(path) => self.fetch_local(&path).await,
        }
    }
}
