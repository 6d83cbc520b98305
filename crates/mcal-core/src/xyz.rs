//! CIE XYZ triples and standard illuminant targets.
//!
//! The profile connection space works in XYZ; calibration only needs the
//! two standard illuminants a user can target (D65 for SDR displays, D50
//! for print-matched work) plus the ICC PCS illuminant, which is always
//! D50 for v2 profiles.

use serde::{Deserialize, Serialize};

/// A color in CIE XYZ space.
///
/// Components are non-negative reals; Y = 1.0 corresponds to the reference
/// white luminance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    /// X component.
    pub x: f64,
    /// Y component (luminance).
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Xyz {
    /// Creates a new XYZ triple.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as an array.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise scale.
    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

/// D50 reference white (ICC profile connection space illuminant).
pub const D50: Xyz = Xyz::new(0.9642, 1.0, 0.8249);

/// D65 reference white (sRGB / Rec. 709 display illuminant).
pub const D65: Xyz = Xyz::new(0.9505, 1.0, 1.0888);

/// A standard illuminant the user can target for calibration.
///
/// Parsed case-insensitively by substring; anything unrecognized falls
/// back to [`WhitePoint::D50`].
///
/// # Example
///
/// ```rust
/// use mcal_core::WhitePoint;
///
/// assert_eq!(WhitePoint::parse("D65 (Daylight)"), WhitePoint::D65);
/// assert_eq!(WhitePoint::parse("native"), WhitePoint::D50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WhitePoint {
    /// D50 (~5000K), the ICC PCS illuminant.
    #[default]
    D50,
    /// D65 (~6500K), the sRGB display illuminant.
    D65,
}

impl WhitePoint {
    /// Parses a target identifier.
    ///
    /// Matches "D65" or "D50" as a case-insensitive substring; unknown
    /// input defaults to D50.
    pub fn parse(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        if upper.contains("D65") {
            Self::D65
        } else {
            Self::D50
        }
    }

    /// Reference XYZ for this illuminant.
    pub const fn xyz(self) -> Xyz {
        match self {
            Self::D50 => D50,
            Self::D65 => D65,
        }
    }

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::D50 => "D50",
            Self::D65 => "D65",
        }
    }
}

impl std::fmt::Display for WhitePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_substring_case_insensitive() {
        assert_eq!(WhitePoint::parse("d65"), WhitePoint::D65);
        assert_eq!(WhitePoint::parse("Target: D65 (SDR)"), WhitePoint::D65);
        assert_eq!(WhitePoint::parse("D50 (Print)"), WhitePoint::D50);
    }

    #[test]
    fn test_parse_unknown_defaults_to_d50() {
        assert_eq!(WhitePoint::parse(""), WhitePoint::D50);
        assert_eq!(WhitePoint::parse("E"), WhitePoint::D50);
        assert_eq!(WhitePoint::parse("9300K"), WhitePoint::D50);
    }

    #[test]
    fn test_reference_values() {
        let d65 = WhitePoint::D65.xyz();
        assert_abs_diff_eq!(d65.x, 0.9505, epsilon = 1e-9);
        assert_abs_diff_eq!(d65.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d65.z, 1.0888, epsilon = 1e-9);
    }
}
