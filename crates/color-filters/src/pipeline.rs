use crate::filters::{apply_reading_mode, invert, rotate_hue, scale_contrast, sepia_tint};
use crate::grid::{ensure_non_empty, PixelGrid};
use crate::{FilterError, FilterSettings};

/// Run the full filter pipeline in its fixed order.
///
/// 1. [`scale_contrast`] by `settings.contrast`
/// 2. [`rotate_hue`] by `settings.hue`
/// 3. [`invert`] if enabled
/// 4. [`sepia_tint`] if enabled
/// 5. [`apply_reading_mode`] if enabled
///
/// Settings are validated before any pixel is touched, so a bad record
/// never produces partial work.
pub fn apply(grid: &PixelGrid, settings: &FilterSettings) -> Result<PixelGrid, FilterError> {
    settings.validate()?;
    ensure_non_empty(grid)?;

    let mut out = scale_contrast(grid, settings.contrast)?;
    out = rotate_hue(&out, settings.hue)?;
    if settings.invert {
        out = invert(&out)?;
    }
    if settings.sepia {
        out = sepia_tint(&out)?;
    }
    if settings.reading_mode {
        out = apply_reading_mode(&out)?;
    }
    Ok(out)
}
