//! Minimal ICC profile reader.
//!
//! Parses the header and tag directory of a v2 profile and decodes the
//! payload types the encoder emits (XYZType, curveType,
//! textDescriptionType, textType). Enough for round-trip validation and
//! the CLI `info` command; this is not a general-purpose ICC parser.

use crate::error::{IccError, IccResult};
use crate::fixed::{s15f16_decode, u8f8_decode};
use crate::write::HEADER_LEN;
use mcal_core::Xyz;
use std::path::Path;

/// One entry of the tag directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    /// 4-byte tag signature.
    pub signature: [u8; 4],
    /// Offset of the payload from the start of the file.
    pub offset: u32,
    /// Unpadded payload length.
    pub length: u32,
}

impl TagEntry {
    /// Signature as a string (signatures are ASCII by construction).
    pub fn signature_str(&self) -> String {
        String::from_utf8_lossy(&self.signature).into_owned()
    }
}

/// A parsed profile: header fields, tag directory, and the raw bytes.
#[derive(Debug, Clone)]
pub struct ParsedProfile {
    /// Declared total file size from the header.
    pub size: u32,
    /// Profile version bytes (major, minor/bugfix, 0, 0).
    pub version: [u8; 4],
    /// Device class signature (e.g. `mntr`).
    pub device_class: [u8; 4],
    /// Data color space signature (e.g. `RGB `).
    pub color_space: [u8; 4],
    /// Profile connection space signature (e.g. `XYZ `).
    pub pcs: [u8; 4],
    /// Primary platform signature.
    pub platform: [u8; 4],
    /// Tag directory in file order.
    pub tags: Vec<TagEntry>,
    bytes: Vec<u8>,
}

impl ParsedProfile {
    /// Looks up a tag entry by signature.
    pub fn find_tag(&self, signature: &[u8; 4]) -> Option<&TagEntry> {
        self.tags.iter().find(|t| &t.signature == signature)
    }

    /// Raw unpadded payload of a tag, including its type signature.
    pub fn tag_payload(&self, signature: &[u8; 4]) -> Option<&[u8]> {
        let entry = self.find_tag(signature)?;
        let start = entry.offset as usize;
        let end = start + entry.length as usize;
        self.bytes.get(start..end)
    }

    /// Decodes an XYZType tag (wtpt, bkpt, rXYZ, gXYZ, bXYZ).
    pub fn xyz_tag(&self, signature: &[u8; 4]) -> IccResult<Xyz> {
        let payload = self
            .tag_payload(signature)
            .ok_or_else(|| missing(signature))?;
        if payload.len() < 20 || &payload[0..4] != b"XYZ " {
            return Err(IccError::InvalidProfile(format!(
                "tag {:?} is not an XYZType",
                String::from_utf8_lossy(signature)
            )));
        }
        let v = |i: usize| -> f64 {
            s15f16_decode(i32::from_be_bytes(payload[i..i + 4].try_into().unwrap()))
        };
        Ok(Xyz::new(v(8), v(12), v(16)))
    }

    /// Decodes a single-entry curveType tag as a gamma exponent.
    pub fn gamma_tag(&self, signature: &[u8; 4]) -> IccResult<f64> {
        let payload = self
            .tag_payload(signature)
            .ok_or_else(|| missing(signature))?;
        if payload.len() < 14 || &payload[0..4] != b"curv" {
            return Err(IccError::InvalidProfile(format!(
                "tag {:?} is not a curveType",
                String::from_utf8_lossy(signature)
            )));
        }
        let count = u32::from_be_bytes(payload[8..12].try_into().unwrap());
        if count != 1 {
            return Err(IccError::InvalidProfile(format!(
                "curve tag has {} entries, expected a single gamma value",
                count
            )));
        }
        Ok(u8f8_decode(u16::from_be_bytes(
            payload[12..14].try_into().unwrap(),
        )))
    }

    /// Decodes the ASCII part of a textDescriptionType tag.
    pub fn description(&self) -> IccResult<String> {
        let payload = self.tag_payload(b"desc").ok_or_else(|| missing(b"desc"))?;
        if payload.len() < 12 || &payload[0..4] != b"desc" {
            return Err(IccError::InvalidProfile("malformed desc tag".into()));
        }
        let count = u32::from_be_bytes(payload[8..12].try_into().unwrap()) as usize;
        let text = payload
            .get(12..12 + count)
            .ok_or_else(|| IccError::InvalidProfile("desc tag truncated".into()))?;
        Ok(String::from_utf8_lossy(text)
            .trim_end_matches('\0')
            .to_string())
    }

    /// Decodes a textType tag (cprt).
    pub fn copyright(&self) -> IccResult<String> {
        let payload = self.tag_payload(b"cprt").ok_or_else(|| missing(b"cprt"))?;
        if payload.len() < 8 || &payload[0..4] != b"text" {
            return Err(IccError::InvalidProfile("malformed cprt tag".into()));
        }
        Ok(String::from_utf8_lossy(&payload[8..])
            .trim_end_matches('\0')
            .to_string())
    }
}

fn missing(signature: &[u8; 4]) -> IccError {
    IccError::InvalidProfile(format!(
        "missing tag {:?}",
        String::from_utf8_lossy(signature)
    ))
}

/// Parses a profile from bytes.
pub fn parse_profile(bytes: &[u8]) -> IccResult<ParsedProfile> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(IccError::InvalidProfile("file shorter than header".into()));
    }
    if &bytes[36..40] != b"acsp" {
        return Err(IccError::InvalidProfile(
            "missing 'acsp' profile signature".into(),
        ));
    }

    let size = u32::from_be_bytes(bytes[0..4].try_into().unwrap());
    if size as usize != bytes.len() {
        return Err(IccError::InvalidProfile(format!(
            "declared size {} does not match file length {}",
            size,
            bytes.len()
        )));
    }

    let field = |i: usize| -> [u8; 4] { bytes[i..i + 4].try_into().unwrap() };

    let count = u32::from_be_bytes(bytes[HEADER_LEN..HEADER_LEN + 4].try_into().unwrap()) as usize;
    let table_end = HEADER_LEN + 4 + count * 12;
    if bytes.len() < table_end {
        return Err(IccError::InvalidProfile("tag table truncated".into()));
    }

    let mut tags = Vec::with_capacity(count);
    for i in 0..count {
        let base = HEADER_LEN + 4 + i * 12;
        let entry = TagEntry {
            signature: field(base),
            offset: u32::from_be_bytes(bytes[base + 4..base + 8].try_into().unwrap()),
            length: u32::from_be_bytes(bytes[base + 8..base + 12].try_into().unwrap()),
        };
        let end = entry.offset as usize + entry.length as usize;
        if end > bytes.len() {
            return Err(IccError::InvalidProfile(format!(
                "tag {:?} extends past end of file",
                entry.signature_str()
            )));
        }
        tags.push(entry);
    }

    Ok(ParsedProfile {
        size,
        version: field(8),
        device_class: field(12),
        color_space: field(16),
        pcs: field(20),
        platform: field(40),
        tags,
        bytes: bytes.to_vec(),
    })
}

/// Reads and parses a profile file.
pub fn read_profile<P: AsRef<Path>>(path: P) -> IccResult<ParsedProfile> {
    let bytes = std::fs::read(path)?;
    parse_profile(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ProfileDescriptor;
    use crate::write::encode_profile;
    use approx::assert_abs_diff_eq;
    use mcal_core::D65;

    fn sample() -> ParsedProfile {
        let desc = ProfileDescriptor::new("Round Trip")
            .with_white_point(D65)
            .with_gamma(2.2);
        parse_profile(&encode_profile(&desc).unwrap()).unwrap()
    }

    #[test]
    fn test_header_roundtrip() {
        let p = sample();
        assert_eq!(&p.device_class, b"mntr");
        assert_eq!(&p.color_space, b"RGB ");
        assert_eq!(&p.pcs, b"XYZ ");
        assert_eq!(&p.platform, b"APPL");
        assert_eq!(p.version, [0x02, 0x40, 0x00, 0x00]);
        assert_eq!(p.tags.len(), 10);
    }

    #[test]
    fn test_white_point_roundtrip_within_fixed_point() {
        let p = sample();
        let wp = p.xyz_tag(b"wtpt").unwrap();
        assert_abs_diff_eq!(wp.x, 0.9505, epsilon = 1.0 / 65536.0);
        assert_abs_diff_eq!(wp.y, 1.0, epsilon = 1.0 / 65536.0);
        assert_abs_diff_eq!(wp.z, 1.0888, epsilon = 1.0 / 65536.0);
    }

    #[test]
    fn test_gamma_roundtrip_within_u8f8() {
        let p = sample();
        for sig in [b"rTRC", b"gTRC", b"bTRC"] {
            let g = p.gamma_tag(sig).unwrap();
            assert!((g - 2.2).abs() <= 1.0 / 256.0);
        }
    }

    #[test]
    fn test_text_roundtrip() {
        let p = sample();
        assert_eq!(p.description().unwrap(), "Round Trip");
        assert_eq!(p.copyright().unwrap(), "Copyright mcal contributors");
    }

    #[test]
    fn test_black_point_is_zero() {
        let p = sample();
        let bk = p.xyz_tag(b"bkpt").unwrap();
        assert_eq!(bk, Xyz::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_rejects_bad_signature() {
        let mut bytes = encode_profile(&ProfileDescriptor::new("x")).unwrap();
        bytes[36] = b'X';
        assert!(matches!(
            parse_profile(&bytes),
            Err(IccError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let mut bytes = encode_profile(&ProfileDescriptor::new("x")).unwrap();
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(
            parse_profile(&bytes),
            Err(IccError::InvalidProfile(_))
        ));
    }
}
