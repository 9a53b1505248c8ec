//! 8-bit HSV with the hue packed into 0..180
//!
//! A full turn of 360 degrees does not fit in a byte, so hue is stored at
//! half resolution: one step is two degrees. Forward conversion uses 12-bit
//! fixed point with reciprocal tables; the inverse goes through `f32` and
//! rounds half-to-even. Both mirror the common 8-bit image-library
//! conversion so that filtered output matches what users already see
//! elsewhere.

use std::sync::OnceLock;

/// Number of hue steps in a full turn.
pub const HUE_RANGE: u16 = 180;

const SHIFT: u32 = 12;
const ROUND: i32 = 1 << (SHIFT - 1);

/// (blue, green, red) source slots per hue sector, indexing the
/// `[v, p, q, t]` table in [`Hsv8::to_rgb`].
const SECTOR_SLOTS: [[usize; 3]; 6] = [
    [1, 3, 0],
    [1, 0, 2],
    [3, 0, 1],
    [0, 2, 1],
    [0, 1, 3],
    [2, 1, 0],
];

struct DivTables {
    /// `(255 << SHIFT) / v`
    saturation: [i32; 256],
    /// `(HUE_RANGE << SHIFT) / (6 * diff)`
    hue: [i32; 256],
}

fn div_tables() -> &'static DivTables {
    static TABLES: OnceLock<DivTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut saturation = [0i32; 256];
        let mut hue = [0i32; 256];
        for i in 1..256 {
            saturation[i] = ((255 << SHIFT) as f64 / i as f64).round() as i32;
            hue[i] = (((HUE_RANGE as i32) << SHIFT) as f64 / (6.0 * i as f64)).round() as i32;
        }
        DivTables { saturation, hue }
    })
}

/// A pixel in 8-bit HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv8 {
    /// Hue in two-degree steps, 0..180
    pub h: u8,
    /// Saturation, 0..=255
    pub s: u8,
    /// Value (max channel), 0..=255
    pub v: u8,
}

impl Hsv8 {
    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let tables = div_tables();
        let (r, g, b) = (r as i32, g as i32, b as i32);

        let v = r.max(g).max(b);
        let vmin = r.min(g).min(b);
        let diff = v - vmin;

        // All-ones masks select the branch without data-dependent jumps
        let vr: i32 = if v == r { -1 } else { 0 };
        let vg: i32 = if v == g { -1 } else { 0 };

        let s = (diff * tables.saturation[v as usize] + ROUND) >> SHIFT;
        let mut h = (vr & (g - b))
            + (!vr & ((vg & (b - r + 2 * diff)) + (!vg & (r - g + 4 * diff))));
        h = (h * tables.hue[diff as usize] + ROUND) >> SHIFT;
        if h < 0 {
            h += HUE_RANGE as i32;
        }

        Self {
            h: h as u8,
            s: s as u8,
            v: v as u8,
        }
    }

    pub fn to_rgb(self) -> [u8; 3] {
        let s = self.s as f32 * (1.0 / 255.0);
        let v = self.v as f32 * (1.0 / 255.0);

        let (r, g, b) = if self.s == 0 {
            (v, v, v)
        } else {
            let mut h = self.h as f32 * (6.0 / HUE_RANGE as f32);
            while h < 0.0 {
                h += 6.0;
            }
            while h >= 6.0 {
                h -= 6.0;
            }
            let mut sector = h.floor() as usize;
            h -= sector as f32;
            if sector >= 6 {
                sector = 0;
                h = 0.0;
            }

            let tab = [v, v * (1.0 - s), v * (1.0 - s * h), v * (1.0 - s * (1.0 - h))];
            let [bi, gi, ri] = SECTOR_SLOTS[sector];
            (tab[ri], tab[gi], tab[bi])
        };

        [r, g, b].map(|c| (c * 255.0).round_ties_even().clamp(0.0, 255.0) as u8)
    }
}
