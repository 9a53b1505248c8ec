use crate::grid::{map_samples, PixelGrid};
use crate::FilterError;

/// Photographic negative: `255 - sample` on every channel.
pub fn invert(grid: &PixelGrid) -> Result<PixelGrid, FilterError> {
    map_samples(grid, |s| 255 - s)
}
