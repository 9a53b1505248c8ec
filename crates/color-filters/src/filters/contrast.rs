use crate::grid::{map_samples, PixelGrid};
use crate::FilterError;

/// Multiply every sample by `factor`, rounding half-to-even and saturating
/// at 0 and 255.
///
/// Factors above 1 spread the samples apart (and push bright areas into
/// white); factors below 1 compress them toward black.
///
/// # Errors
///
/// [`FilterError::InvalidContrast`] if `factor` is NaN, infinite, or not
/// above zero.
pub fn scale_contrast(grid: &PixelGrid, factor: f32) -> Result<PixelGrid, FilterError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(FilterError::InvalidContrast(factor));
    }

    let mut table = [0u8; 256];
    for (value, out) in table.iter_mut().enumerate() {
        *out = (value as f32 * factor).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    map_samples(grid, |s| table[s as usize])
}
