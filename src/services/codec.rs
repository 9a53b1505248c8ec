//! Image decoding, PNG encoding and data URIs.
//!
//! This is the only place where bytes become a [`PixelGrid`] and back.
//! Every decoder output is converted to RGB here, so the filters never see
//! another channel order.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_filters::PixelGrid;
use std::io::Cursor;
use thiserror::Error;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid data URI: {0}")]
    DataUri(String),

    #[error("Image has no pixels")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encode error: {0}")]
    Png(String),
}

/// Decode any supported format (PNG, JPEG, GIF, BMP, WebP) to RGB.
///
/// Alpha is dropped, not composited.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    let grid = image::load_from_memory(bytes)?.to_rgb8();
    if grid.width() == 0 || grid.height() == 0 {
        return Err(DecodeError::Empty);
    }
    Ok(grid)
}

/// Encode a grid as an 8-bit RGB PNG.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, grid.width(), grid.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| EncodeError::Png(e.to_string()))?;
        writer
            .write_image_data(grid.as_raw())
            .map_err(|e| EncodeError::Png(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut uri);
    uri
}

/// Extract the payload of a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DecodeError> {
    // Scheme and the base64 marker are case-insensitive (RFC 2397)
    let rest = match uri.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("data:") => &uri[5..],
        _ => return Err(DecodeError::DataUri("missing data: prefix".to_string())),
    };
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::DataUri("missing ',' separator".to_string()))?;
    let is_base64 = header
        .len()
        .checked_sub(";base64".len())
        .and_then(|start| header.get(start..))
        .is_some_and(|marker| marker.eq_ignore_ascii_case(";base64"));
    if !is_base64 {
        return Err(DecodeError::DataUri(
            "only base64-encoded data URIs are supported".to_string(),
        ));
    }

    // Inline images are often wrapped across lines
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| DecodeError::DataUri(e.to_string()))
}
