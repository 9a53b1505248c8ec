//! Gamma lookup table access functions
//!
//! Tables are generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB code value to linear light (0.0..=1.0).
#[inline]
pub fn srgb_u8_to_linear(code: u8) -> f32 {
    SRGB_U8_TO_LINEAR[code as usize]
}

/// Convert a linear RGB value (0.0..=1.0) to sRGB using LUT with linear interpolation.
///
/// Out-of-range input is clamped; Lab decoding routinely lands slightly
/// outside the gamut.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = linear.clamp(0.0, 1.0);

    // Scale to LUT index range (0..4095)
    let scaled = linear * 4095.0;
    let index = scaled as usize;

    if index >= 4095 {
        return LINEAR_TO_SRGB[4095];
    }

    let frac = scaled - index as f32;
    let a = LINEAR_TO_SRGB[index];
    let b = LINEAR_TO_SRGB[index + 1];
    a + (b - a) * frac
}
