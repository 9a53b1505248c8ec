//! The filter palette.
//!
//! Every filter takes a borrowed [`PixelGrid`](crate::PixelGrid) and
//! returns a new one; inputs are never modified. Each rejects a grid
//! without pixels with [`FilterError::EmptyGrid`](crate::FilterError).

mod contrast;
mod equalize;
mod grayscale;
mod hue;
mod invert;
mod sepia;

pub use contrast::scale_contrast;
pub use equalize::equalize_contrast;
pub use grayscale::{apply_reading_mode, to_grayscale_rgb, READING_MODE_CONTRAST};
pub use hue::{rotate_hue, MAX_HUE_DEGREES};
pub use invert::invert;
pub use sepia::sepia_tint;
