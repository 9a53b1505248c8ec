//! Named starting points for common colour-vision deficiencies.
//!
//! The table is static; a preset is looked up, copied into a
//! [`FilterSettings`] and adjusted from there.

use crate::FilterSettings;

/// A named settings record with a short explanation for users.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Stable lookup key, lowercase
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// One line shown after the preset is applied
    pub description: &'static str,
    pub settings: FilterSettings,
}

const fn preset_settings(contrast: f32, hue: u16, reading_mode: bool) -> FilterSettings {
    FilterSettings {
        contrast,
        hue,
        invert: false,
        sepia: false,
        reading_mode,
    }
}

/// All presets, in display order.
pub static PRESETS: [Preset; 5] = [
    Preset {
        key: "default",
        label: "Default",
        description: "Default settings restored",
        settings: preset_settings(1.3, 20, false),
    },
    Preset {
        key: "protanopia",
        label: "Protanopia (Red-blind)",
        description: "Red color deficiency - enhances contrast for red-blindness",
        settings: preset_settings(1.5, 180, false),
    },
    Preset {
        key: "deuteranopia",
        label: "Deuteranopia (Green-blind)",
        description: "Green color deficiency - enhances green perception",
        settings: preset_settings(1.4, 90, false),
    },
    Preset {
        key: "tritanopia",
        label: "Tritanopia (Blue-blind)",
        description: "Blue color deficiency - enhances blue perception",
        settings: preset_settings(1.6, 270, false),
    },
    Preset {
        key: "reading",
        label: "Reading Mode",
        description: "High contrast grayscale for better text readability",
        settings: preset_settings(1.8, 0, true),
    },
];

/// Every preset, in display order.
pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Find a preset by key or label, ignoring case.
///
/// A name that contains a key also matches, so `"Protanopia"` and
/// `"protanopia (red-blind)"` both resolve to the protanopia preset.
pub fn find(name: &str) -> Option<&'static Preset> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    PRESETS
        .iter()
        .find(|p| p.key == name || p.label.to_lowercase() == name)
        .or_else(|| PRESETS.iter().find(|p| name.contains(p.key)))
}
