//! Profile descriptor: everything the encoder needs for one profile.

use mcal_core::{D50, Xyz};
use serde::{Deserialize, Serialize};

/// Default sRGB primaries in D50-adapted XYZ, used when no measured
/// primaries are supplied.
pub(crate) const SRGB_RED: Xyz = Xyz::new(0.4360, 0.2225, 0.0139);
pub(crate) const SRGB_GREEN: Xyz = Xyz::new(0.3851, 0.7169, 0.0971);
pub(crate) const SRGB_BLUE: Xyz = Xyz::new(0.1431, 0.0606, 0.7139);

/// Input to the profile encoder.
///
/// Built once per export call from the calibration session's results and
/// not persisted beyond the encode. Field defaults describe an sRGB-like
/// display at gamma 2.2.
///
/// # Example
///
/// ```rust
/// use mcal_icc::ProfileDescriptor;
/// use mcal_core::D65;
///
/// let desc = ProfileDescriptor::new("Office Display")
///     .with_white_point(D65)
///     .with_gamma(2.4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDescriptor {
    /// Human-readable profile description ('desc' tag).
    pub description: String,
    /// Copyright string ('cprt' tag).
    pub copyright: String,
    /// Media white point ('wtpt' tag).
    pub white_point: Xyz,
    /// Red primary in XYZ ('rXYZ' tag).
    pub red: Xyz,
    /// Green primary in XYZ ('gXYZ' tag).
    pub green: Xyz,
    /// Blue primary in XYZ ('bXYZ' tag).
    pub blue: Xyz,
    /// Tone curve exponent ('rTRC'/'gTRC'/'bTRC' single-entry curves).
    pub gamma: f64,
}

impl ProfileDescriptor {
    /// Creates a descriptor with sRGB-like defaults.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            copyright: "Copyright mcal contributors".to_string(),
            white_point: D50,
            red: SRGB_RED,
            green: SRGB_GREEN,
            blue: SRGB_BLUE,
            gamma: 2.2,
        }
    }

    /// Sets the copyright string.
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }

    /// Sets the media white point.
    pub fn with_white_point(mut self, wp: Xyz) -> Self {
        self.white_point = wp;
        self
    }

    /// Sets the measured primaries.
    pub fn with_primaries(mut self, red: Xyz, green: Xyz, blue: Xyz) -> Self {
        self.red = red;
        self.green = green;
        self.blue = blue;
        self
    }

    /// Sets the tone curve gamma.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }
}
