//! Colour space conversions used by the filters.
//!
//! Everything here works on single `[u8; 3]` RGB triples so the filters
//! can stay simple per-pixel maps:
//!
//! - [`Hsv8`]: 8-bit HSV with hue in two-degree steps
//! - [`Lab8`]: packed 8-bit CIE L\*a\*b\*
//! - [`luma`]: BT.601 fixed-point luma
//! - [`lut`]: sRGB transfer function tables generated by the build script

mod hsv;
mod lab;
mod luma;
pub mod lut;

pub use hsv::{Hsv8, HUE_RANGE};
pub use lab::Lab8;
pub use luma::luma;
