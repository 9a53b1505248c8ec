//! Error type for the filter palette.

use std::fmt;

/// Invalid input to a filter or to the pipeline.
///
/// Every variant describes a caller mistake; none of the filters can fail
/// once their input has been accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Grid has zero width or zero height
    EmptyGrid { width: u32, height: u32 },
    /// Raw buffer length does not match `width * height * 3`
    BufferLength { expected: usize, actual: usize },
    /// Contrast factor is not finite or not strictly positive
    InvalidContrast(f32),
    /// Hue rotation outside 0..=360 degrees
    InvalidHue(u16),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::EmptyGrid { width, height } => {
                write!(f, "image has no pixels ({}x{})", width, height)
            }
            FilterError::BufferLength { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
            FilterError::InvalidContrast(value) => {
                write!(f, "contrast must be a finite value above 0, got {}", value)
            }
            FilterError::InvalidHue(value) => {
                write!(f, "hue must be between 0 and 360 degrees, got {}", value)
            }
        }
    }
}

impl std::error::Error for FilterError {}
