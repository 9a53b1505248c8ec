use crate::color::Lab8;
use image::Rgb;

use crate::grid::{ensure_non_empty, PixelGrid};
use crate::FilterError;

/// Spread the lightness histogram over the full range, leaving chroma alone.
///
/// Pixels are converted to packed 8-bit L\*a\*b\*, the `L` channel is
/// histogram-equalized and the result converted back to RGB. Colours keep
/// their hue while dim, flat images gain contrast.
pub fn equalize_contrast(grid: &PixelGrid) -> Result<PixelGrid, FilterError> {
    ensure_non_empty(grid)?;

    let lab: Vec<Lab8> = grid.pixels().map(|p| Lab8::from_rgb(p.0)).collect();

    let mut histogram = [0u32; 256];
    for px in &lab {
        histogram[px.l as usize] += 1;
    }
    let lut = equalization_lut(&histogram);

    let mut out = grid.clone();
    for (pixel, mut px) in out.pixels_mut().zip(lab) {
        px.l = lut[px.l as usize];
        *pixel = Rgb(px.to_rgb());
    }
    Ok(out)
}

/// Mapping from histogram bins to equalized values.
///
/// The lowest occupied bin maps to 0 and the cumulative count of the bins
/// above it is stretched to 255. A histogram with a single occupied bin
/// maps every value to itself.
pub(crate) fn equalization_lut(histogram: &[u32; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let total: u64 = histogram.iter().map(|&c| c as u64).sum();

    let Some(first) = histogram.iter().position(|&c| c > 0) else {
        return identity_lut();
    };
    if histogram[first] as u64 == total {
        return identity_lut();
    }

    let scale = 255.0 / (total - histogram[first] as u64) as f32;
    let mut cumulative = 0u64;
    for i in first + 1..256 {
        cumulative += histogram[i] as u64;
        lut[i] = (cumulative as f32 * scale).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    lut
}

fn identity_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = i as u8;
    }
    lut
}
