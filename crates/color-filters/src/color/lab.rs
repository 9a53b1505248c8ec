//! 8-bit CIE L\*a\*b\* (D65, sRGB primaries)
//!
//! The 8-bit packing is the usual one for image processing libraries:
//! `L` is rescaled from 0..=100 to 0..=255, `a` and `b` are offset by 128.
//! Histogram equalization only ever touches the packed `L` byte.

use super::lut::{linear_to_srgb, srgb_u8_to_linear};

/// sRGB (linear) to CIE XYZ, D65.
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// CIE XYZ to sRGB (linear), D65.
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240479, -1.537150, -0.498535],
    [-0.969256, 1.875991, 0.041556],
    [0.055648, -0.204043, 1.057311],
];

/// D65 reference white (Y = 1).
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;
const LINEAR_SLOPE: f32 = 7.787;
const LINEAR_OFFSET: f32 = 16.0 / 116.0;

/// A pixel in packed 8-bit L\*a\*b\*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lab8 {
    /// Lightness, 0..=100 rescaled to 0..=255
    pub l: u8,
    /// Green-red axis offset by 128
    pub a: u8,
    /// Blue-yellow axis offset by 128
    pub b: u8,
}

impl Lab8 {
    /// Convert an 8-bit RGB triple.
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let [l, a, b] = rgb_to_lab(rgb);
        Self {
            l: quantize(l * 255.0 / 100.0),
            a: quantize(a + 128.0),
            b: quantize(b + 128.0),
        }
    }

    /// Convert back to an 8-bit RGB triple, clipping out-of-gamut values.
    pub fn to_rgb(self) -> [u8; 3] {
        let l = self.l as f32 * 100.0 / 255.0;
        let a = self.a as f32 - 128.0;
        let b = self.b as f32 - 128.0;

        let (fy, y) = if l <= KAPPA * EPSILON {
            let y = l / KAPPA;
            (LINEAR_SLOPE * y + LINEAR_OFFSET, y)
        } else {
            let fy = (l + 16.0) / 116.0;
            (fy, fy * fy * fy)
        };

        let x = WHITE_X * f_inverse(a / 500.0 + fy);
        let z = WHITE_Z * f_inverse(fy - b / 200.0);

        let linear = mul(&XYZ_TO_RGB, [x, y, z]);
        linear.map(|c| quantize(linear_to_srgb(c) * 255.0))
    }
}

/// Unpacked L\*a\*b\* (L in 0..=100, a/b unbounded around 0).
pub(crate) fn rgb_to_lab(rgb: [u8; 3]) -> [f32; 3] {
    let linear = rgb.map(srgb_u8_to_linear);
    let [x, y, z] = mul(&RGB_TO_XYZ, linear);

    let fx = f(x / WHITE_X);
    let fy = f(y);
    let fz = f(z / WHITE_Z);

    let l = if y > EPSILON {
        116.0 * fy - 16.0
    } else {
        KAPPA * y
    };
    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

#[inline]
fn f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

#[inline]
fn f_inverse(t: f32) -> f32 {
    // cbrt(EPSILON)
    if t > 0.206893 {
        t * t * t
    } else {
        (t - LINEAR_OFFSET) / LINEAR_SLOPE
    }
}

#[inline]
fn mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

#[inline]
fn quantize(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
