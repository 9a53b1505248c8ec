//! Coloraid - colour adjustment for colour-vision deficiencies
//!
//! HTTP service and CLI around the `color-filters` crate.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod video;
