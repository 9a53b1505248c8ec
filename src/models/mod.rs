pub mod config;

pub use config::{AppConfig, CorsConfig, FetchConfig, DEFAULT_BIND_ADDR};
