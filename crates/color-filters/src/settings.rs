//! Filter settings and their validation.
//!
//! [`FilterSettings`] is a plain value: the pipeline reads it, never
//! mutates it. Callers that share settings across threads swap whole
//! records rather than editing fields in place.

use crate::filters::MAX_HUE_DEGREES;
use crate::FilterError;

/// Parameters for [`apply`](crate::apply).
///
/// # Defaults
///
/// The default is the start-up state users see first:
/// - Contrast: 1.3
/// - Hue: 20 degrees
/// - Invert, sepia and reading mode: off
///
/// [`FilterSettings::identity`] is the record that changes nothing except
/// for HSV rounding in the hue step.
///
/// # Example
///
/// ```
/// use color_filters::FilterSettings;
///
/// let settings = FilterSettings::identity()
///     .contrast(1.5)
///     .hue(90)
///     .invert(true);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    /// Contrast multiplier applied to every sample.
    ///
    /// - 1.0 = no change
    /// - 1.3 = default
    /// - 2.0 = top of the usual slider range
    pub contrast: f32,

    /// Hue rotation in degrees, 0..=360.
    pub hue: u16,

    /// Photographic negative.
    pub invert: bool,

    /// Warm sepia tint, labelled "Blue Light" in user interfaces.
    pub sepia: bool,

    /// Grayscale plus extra contrast for text.
    pub reading_mode: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            contrast: 1.3,
            hue: 20,
            invert: false,
            sepia: false,
            reading_mode: false,
        }
    }
}

impl FilterSettings {
    /// Settings with no contrast change, no hue shift and every toggle off.
    pub const fn identity() -> Self {
        Self {
            contrast: 1.0,
            hue: 0,
            invert: false,
            sepia: false,
            reading_mode: false,
        }
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn hue(mut self, degrees: u16) -> Self {
        self.hue = degrees;
        self
    }

    #[inline]
    pub fn invert(mut self, enabled: bool) -> Self {
        self.invert = enabled;
        self
    }

    #[inline]
    pub fn sepia(mut self, enabled: bool) -> Self {
        self.sepia = enabled;
        self
    }

    #[inline]
    pub fn reading_mode(mut self, enabled: bool) -> Self {
        self.reading_mode = enabled;
        self
    }

    /// Check every field before any pixel work starts.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidContrast`] unless contrast is finite and above 0
    /// - [`FilterError::InvalidHue`] for hue above 360
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.contrast.is_finite() || self.contrast <= 0.0 {
            return Err(FilterError::InvalidContrast(self.contrast));
        }
        if self.hue > MAX_HUE_DEGREES {
            return Err(FilterError::InvalidHue(self.hue));
        }
        Ok(())
    }
}
