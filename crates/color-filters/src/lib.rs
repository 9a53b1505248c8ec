#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! color-filters: colour adjustment filters for colour-vision aids
//!
//! A small palette of pure image filters on 8-bit RGB grids, plus the
//! fixed pipeline that combines them.
//!
//! # Quick Start
//!
//! ```
//! use color_filters::{apply, grid, FilterSettings};
//!
//! let image = grid::from_raw(2, 2, vec![255; 12]).unwrap();
//! let inverted = apply(&image, &FilterSettings::identity().invert(true)).unwrap();
//! assert!(inverted.iter().all(|&s| s == 0));
//! ```
//!
//! # Filters
//!
//! - [`scale_contrast`]: multiply samples, saturating
//! - [`rotate_hue`]: shift hue through 8-bit HSV
//! - [`invert`]: photographic negative
//! - [`sepia_tint`]: warm tint that cuts blue light
//! - [`to_grayscale_rgb`] and [`apply_reading_mode`]: grayscale for reading
//! - [`equalize_contrast`]: lightness histogram equalization in L\*a\*b\*
//!
//! Every filter borrows its input and returns a fresh grid. Identical
//! inputs always give bit-identical output.
//!
//! # Pipeline
//!
//! [`apply`] validates a [`FilterSettings`] and then runs contrast, hue,
//! invert, sepia and reading mode in that order. [`equalize_contrast`] is
//! not part of the pipeline; it is a one-step enhancement on its own.
//!
//! # Presets
//!
//! [`presets::find`] resolves names like `"protanopia"` to a starting
//! [`FilterSettings`].

pub mod color;
mod error;
pub mod filters;
pub mod grid;
mod pipeline;
pub mod presets;
mod settings;


pub use error::FilterError;
pub use filters::{
    apply_reading_mode, equalize_contrast, invert, rotate_hue, scale_contrast, sepia_tint,
    to_grayscale_rgb,
};
pub use grid::PixelGrid;
pub use pipeline::apply;
pub use presets::Preset;
pub use settings::FilterSettings;
