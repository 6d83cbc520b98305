//! ICC fixed-point number encodings.
//!
//! Two encodings appear in v2 display profiles:
//!
//! - **s15.16**: signed 32-bit, 16 fractional bits. Used for XYZ numbers
//!   and the PCS illuminant. Encoded by `value * 65536` rounded toward
//!   zero (truncation, matching the reference encoder).
//! - **u8.8**: unsigned 16-bit, 8 fractional bits. Used for single-entry
//!   `curv` tags, where the lone value is a pure power-law gamma.

/// Encodes a real value as signed 15.16 fixed point (truncating).
#[inline]
pub fn s15f16_encode(v: f64) -> i32 {
    (v * 65536.0) as i32
}

/// Decodes a signed 15.16 fixed-point value.
#[inline]
pub fn s15f16_decode(raw: i32) -> f64 {
    raw as f64 / 65536.0
}

/// Encodes a real value as unsigned 8.8 fixed point (truncating).
#[inline]
pub fn u8f8_encode(v: f64) -> u16 {
    (v * 256.0) as u16
}

/// Decodes an unsigned 8.8 fixed-point value.
#[inline]
pub fn u8f8_decode(raw: u16) -> f64 {
    raw as f64 / 256.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s15f16_roundtrip_within_lsb() {
        for v in [0.0, 1.0, 0.9642, 0.9505, 1.0888, 0.8249, 2.2] {
            let decoded = s15f16_decode(s15f16_encode(v));
            assert!((decoded - v).abs() <= 1.0 / 65536.0, "v={}", v);
        }
    }

    #[test]
    fn test_s15f16_truncates_toward_zero() {
        // 0.99999 * 65536 = 65535.34...; truncation keeps it below 1.0
        assert_eq!(s15f16_encode(0.99999), 65535);
        assert_eq!(s15f16_encode(-0.99999), -65535);
    }

    #[test]
    fn test_u8f8_gamma() {
        assert_eq!(u8f8_encode(2.2), 563); // 2.2 * 256 = 563.2
        assert!((u8f8_decode(563) - 2.2).abs() <= 1.0 / 256.0);
        assert_eq!(u8f8_encode(1.0), 256);
    }
}
