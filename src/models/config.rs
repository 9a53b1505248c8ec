use serde::Deserialize;
use std::path::Path;

/// Default bind address; the browser extension calls this one.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Application configuration loaded from the file named by `CONFIG_FILE`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// How images are fetched
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Cross-origin access for the browser extension
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Image fetching limits
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Largest accepted image body
    pub max_image_bytes: u64,

    /// User-Agent sent with HTTP requests
    pub user_agent: String,

    /// Accept local paths and `file://` URLs as image locations
    pub allow_local_paths: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_image_bytes: 20 * 1024 * 1024,
            user_agent: concat!("coloraid/", env!("CARGO_PKG_VERSION")).to_string(),
            allow_local_paths: false,
        }
    }
}

/// CORS settings
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API (empty = any origin)
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from `CONFIG_FILE`, falling back to defaults
    pub fn load() -> Self {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(path),
            Err(_) => {
                tracing::debug!("CONFIG_FILE not set, using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        timeout_secs = config.fetch.timeout_secs,
                        max_image_bytes = config.fetch.max_image_bytes,
                        cors_origins = config.cors.allowed_origins.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
