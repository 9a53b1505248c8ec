use crate::color::{Hsv8, HUE_RANGE};
use crate::grid::{map_pixels, PixelGrid};
use crate::FilterError;

/// Largest accepted rotation in degrees.
pub const MAX_HUE_DEGREES: u16 = 360;

/// Rotate every pixel's hue by `degrees`.
///
/// Pixels go through 8-bit HSV, whose hue channel counts in two-degree
/// steps, so the rotation is applied as `(h + degrees / 2) % 180` with a
/// truncating division. An odd rotation therefore acts like the even
/// rotation just below it, and 360 acts like 0. Saturation and value are
/// kept; gray pixels have no hue and pass through unchanged.
///
/// # Errors
///
/// [`FilterError::InvalidHue`] for rotations above 360 degrees.
pub fn rotate_hue(grid: &PixelGrid, degrees: u16) -> Result<PixelGrid, FilterError> {
    if degrees > MAX_HUE_DEGREES {
        return Err(FilterError::InvalidHue(degrees));
    }

    let shift = degrees / 2;
    map_pixels(grid, |rgb| {
        let mut hsv = Hsv8::from_rgb(rgb);
        hsv.h = ((hsv.h as u16 + shift) % HUE_RANGE) as u8;
        hsv.to_rgb()
    })
}
