//! Test fixtures and constants.

use color_filters::{grid, PixelGrid};
use coloraid::services::codec;

/// Uniform grid of one colour
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelGrid {
    grid::from_raw(width, height, rgb.repeat((width * height) as usize)).unwrap()
}

/// 2x2 white image
pub fn white() -> PixelGrid {
    solid(2, 2, [255, 255, 255])
}

/// Dim, low-contrast 4x1 gray ramp
pub fn dim_ramp() -> PixelGrid {
    grid::from_raw(4, 1, vec![60, 60, 60, 70, 70, 70, 80, 80, 80, 90, 90, 90]).unwrap()
}

pub fn png_bytes(grid: &PixelGrid) -> Vec<u8> {
    codec::encode_png(grid).unwrap()
}

pub fn png_data_uri(grid: &PixelGrid) -> String {
    codec::png_data_uri(&png_bytes(grid))
}
