use crate::color::luma;
use crate::grid::{map_pixels, PixelGrid};
use crate::FilterError;

use super::scale_contrast;

/// Contrast boost applied on top of grayscale in reading mode.
pub const READING_MODE_CONTRAST: f32 = 1.5;

/// Replace every pixel with its BT.601 luma on all three channels.
pub fn to_grayscale_rgb(grid: &PixelGrid) -> Result<PixelGrid, FilterError> {
    map_pixels(grid, |rgb| {
        let y = luma(rgb);
        [y, y, y]
    })
}

/// Grayscale followed by a 1.5x contrast stretch, for reading text.
pub fn apply_reading_mode(grid: &PixelGrid) -> Result<PixelGrid, FilterError> {
    let gray = to_grayscale_rgb(grid)?;
    scale_contrast(&gray, READING_MODE_CONTRAST)
}
