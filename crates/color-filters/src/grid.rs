//! Pixel grid helpers.
//!
//! A [`PixelGrid`] is an [`image::RgbImage`]: rows of packed `[r, g, b]`
//! bytes. The `Rgb<u8>` pixel type pins the channel order, so nothing
//! inside this crate ever needs to guess whether a buffer is BGR.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::FilterError;

/// 8-bit RGB image, height x width x 3.
pub type PixelGrid = RgbImage;

/// Build a grid from raw interleaved RGB bytes.
pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<PixelGrid, FilterError> {
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyGrid { width, height });
    }
    let expected = width as usize * height as usize * 3;
    let actual = data.len();
    if actual != expected {
        return Err(FilterError::BufferLength { expected, actual });
    }
    ImageBuffer::from_raw(width, height, data).ok_or(FilterError::BufferLength { expected, actual })
}

/// Reject grids without pixels.
pub fn ensure_non_empty(grid: &PixelGrid) -> Result<(), FilterError> {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyGrid { width, height });
    }
    Ok(())
}

/// Apply `f` to every pixel, returning a new grid of the same size.
pub(crate) fn map_pixels<F>(grid: &PixelGrid, mut f: F) -> Result<PixelGrid, FilterError>
where
    F: FnMut([u8; 3]) -> [u8; 3],
{
    ensure_non_empty(grid)?;
    let mut out = grid.clone();
    for pixel in out.pixels_mut() {
        *pixel = Rgb(f(pixel.0));
    }
    Ok(out)
}

/// Apply `f` to every sample independently.
pub(crate) fn map_samples<F>(grid: &PixelGrid, mut f: F) -> Result<PixelGrid, FilterError>
where
    F: FnMut(u8) -> u8,
{
    ensure_non_empty(grid)?;
    let mut out = grid.clone();
    for sample in out.iter_mut() {
        *sample = f(*sample);
    }
    Ok(out)
}
