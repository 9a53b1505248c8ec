//! Fixed-point luma (ITU-R BT.601 weights)

const SHIFT: u32 = 14;
const R_WEIGHT: u32 = 4899; // 0.299 * 2^14
const G_WEIGHT: u32 = 9617; // 0.587 * 2^14
const B_WEIGHT: u32 = 1868; // 0.114 * 2^14

/// Weighted luma of an 8-bit RGB triple, rounded to nearest.
#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    let y = R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32;
    ((y + (1 << (SHIFT - 1))) >> SHIFT) as u8
}
