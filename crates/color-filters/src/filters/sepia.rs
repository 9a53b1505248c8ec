use crate::grid::{map_pixels, PixelGrid};
use crate::FilterError;

/// Sepia weights, one row per output channel, in blue-green-red order on
/// both axes. Row 0 produces blue from `[b, g, r]`.
const SEPIA_BGR: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// Warm sepia tint (the "blue light" filter).
///
/// The weights are laid out blue-first, so the pixel is viewed as
/// `[b, g, r]` for the multiplication and written back as RGB. Results are
/// clamped to 0..=255 and truncated. Bright pixels lose blue first, which
/// is what gives the warm cast: white becomes `(255, 255, 238)`.
pub fn sepia_tint(grid: &PixelGrid) -> Result<PixelGrid, FilterError> {
    map_pixels(grid, |[r, g, b]| {
        let bgr = [b as f32, g as f32, r as f32];
        let [out_b, out_g, out_r] = SEPIA_BGR.map(|row| {
            let v = row[0] * bgr[0] + row[1] * bgr[1] + row[2] * bgr[2];
            v.clamp(0.0, 255.0) as u8
        });
        [out_r, out_g, out_b]
    })
}
