//! ICC v2.4 profile encoder.
//!
//! Emission order: 128-byte header, tag table (count + 12-byte entries
//! sorted by ascending signature), then the tag data blob with each
//! payload padded to a 4-byte boundary. The table records the padded
//! start offset and the *unpadded* logical length of each payload.
//!
//! Tags emitted for a display profile:
//!
//! | Tag | Type | Content |
//! |-----|------|---------|
//! | desc | textDescriptionType | ASCII description |
//! | cprt | textType | NUL-terminated copyright |
//! | wtpt | XYZType | media white point |
//! | bkpt | XYZType | media black point (0,0,0) |
//! | rXYZ/gXYZ/bXYZ | XYZType | primaries, s15.16 |
//! | rTRC/gTRC/bTRC | curveType | single u8.8 entry = pure gamma |

use crate::descriptor::ProfileDescriptor;
use crate::error::{IccError, IccResult};
use crate::fixed::{s15f16_encode, u8f8_encode};
use chrono::{Datelike, Local, Timelike};
use mcal_core::Xyz;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Header length, fixed by the specification.
pub(crate) const HEADER_LEN: usize = 128;

/// Profile version 2.4.0.0.
const VERSION: [u8; 4] = [0x02, 0x40, 0x00, 0x00];

/// Primary platform recorded in the header. The source deployment targets
/// ColorSync, so the Apple signature is kept as a configuration constant.
const PLATFORM: &[u8; 4] = b"APPL";

/// PCS illuminant, always D50 for v2 profiles regardless of the media
/// white point.
const PCS_ILLUMINANT: Xyz = Xyz::new(0.9642, 1.0, 0.8249);

/// Encodes a profile to bytes.
///
/// The returned buffer is the complete file image; [`write_profile`] is a
/// thin atomic-publish wrapper around it.
pub fn encode_profile(desc: &ProfileDescriptor) -> IccResult<Vec<u8>> {
    let mut tags: Vec<([u8; 4], Vec<u8>)> = vec![
        (*b"desc", text_description(&desc.description)?),
        (*b"cprt", text(&desc.copyright)?),
        (*b"wtpt", xyz_number(desc.white_point)),
        (*b"bkpt", xyz_number(Xyz::new(0.0, 0.0, 0.0))),
        (*b"rXYZ", xyz_number(desc.red)),
        (*b"gXYZ", xyz_number(desc.green)),
        (*b"bXYZ", xyz_number(desc.blue)),
        (*b"rTRC", gamma_curve(desc.gamma)),
        (*b"gTRC", gamma_curve(desc.gamma)),
        (*b"bTRC", gamma_curve(desc.gamma)),
    ];

    // Well-formed ICC files keep the tag table sorted by signature.
    tags.sort_by(|a, b| a.0.cmp(&b.0));

    let table_len = 4 + 12 * tags.len();
    let first_offset = HEADER_LEN + table_len;

    let mut entries = Vec::with_capacity(tags.len());
    let mut blob = Vec::new();
    let mut offset = first_offset;

    for (sig, payload) in &tags {
        entries.push((*sig, offset as u32, payload.len() as u32));
        blob.extend_from_slice(payload);
        let padded = payload.len().next_multiple_of(4);
        blob.resize(blob.len() + (padded - payload.len()), 0);
        offset += padded;
    }

    let total_size = offset as u32;

    let mut out = Vec::with_capacity(offset);
    out.extend_from_slice(&header(total_size));
    out.extend_from_slice(&(tags.len() as u32).to_be_bytes());
    for (sig, off, len) in entries {
        out.extend_from_slice(&sig);
        out.extend_from_slice(&off.to_be_bytes());
        out.extend_from_slice(&len.to_be_bytes());
    }
    out.extend_from_slice(&blob);

    debug_assert_eq!(out.len(), total_size as usize);
    Ok(out)
}

/// Writes a profile to `path`.
///
/// Encodes fully in memory, writes to a temporary file beside the
/// destination, and renames it into place, so a failure never leaves a
/// partial `.icc` visible.
pub fn write_profile<P: AsRef<Path>>(path: P, desc: &ProfileDescriptor) -> IccResult<()> {
    let path = path.as_ref();
    let bytes = encode_profile(desc)?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| IccError::Io(e.error))?;
    Ok(())
}

/// Builds the 128-byte header.
fn header(total_size: u32) -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];

    h[0..4].copy_from_slice(&total_size.to_be_bytes());
    // 4..8: CMM type, left zero
    h[8..12].copy_from_slice(&VERSION);
    h[12..16].copy_from_slice(b"mntr"); // device class: display monitor
    h[16..20].copy_from_slice(b"RGB "); // data color space
    h[20..24].copy_from_slice(b"XYZ "); // profile connection space

    // 24..36: dateTimeNumber, six big-endian u16s
    let now = Local::now();
    let stamp: [u16; 6] = [
        now.year() as u16,
        now.month() as u16,
        now.day() as u16,
        now.hour() as u16,
        now.minute() as u16,
        now.second() as u16,
    ];
    for (i, v) in stamp.iter().enumerate() {
        h[24 + i * 2..26 + i * 2].copy_from_slice(&v.to_be_bytes());
    }

    h[36..40].copy_from_slice(b"acsp"); // profile file signature
    h[40..44].copy_from_slice(PLATFORM);
    // 44..48 flags, 48..52 manufacturer, 52..56 model: zero
    // 56..64 attributes, 64..68 rendering intent: zero

    // 68..80: PCS illuminant (D50, s15.16)
    h[68..72].copy_from_slice(&s15f16_encode(PCS_ILLUMINANT.x).to_be_bytes());
    h[72..76].copy_from_slice(&s15f16_encode(PCS_ILLUMINANT.y).to_be_bytes());
    h[76..80].copy_from_slice(&s15f16_encode(PCS_ILLUMINANT.z).to_be_bytes());

    // 80..84 creator, 84..100 profile ID, 100..128 reserved: zero
    h
}

fn ascii_bytes(s: &str) -> IccResult<&[u8]> {
    if !s.is_ascii() {
        return Err(IccError::NonAsciiText(s.to_string()));
    }
    Ok(s.as_bytes())
}

/// textDescriptionType: signature, reserved, ASCII count (with NUL),
/// ASCII bytes, empty Unicode block, empty script-code block.
fn text_description(s: &str) -> IccResult<Vec<u8>> {
    let bytes = ascii_bytes(s)?;
    let count = (bytes.len() + 1) as u32;

    let mut out = Vec::with_capacity(24 + bytes.len());
    out.extend_from_slice(b"desc");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&count.to_be_bytes());
    out.extend_from_slice(bytes);
    out.push(0);
    out.extend_from_slice(&[0; 4]); // no Unicode variant
    out.extend_from_slice(&[0; 2]); // no script-code variant
    Ok(out)
}

/// textType: signature, reserved, NUL-terminated ASCII.
fn text(s: &str) -> IccResult<Vec<u8>> {
    let bytes = ascii_bytes(s)?;
    let mut out = Vec::with_capacity(9 + bytes.len());
    out.extend_from_slice(b"text");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(bytes);
    out.push(0);
    Ok(out)
}

/// XYZType: signature, reserved, three s15.16 values.
fn xyz_number(xyz: Xyz) -> Vec<u8> {
    let mut out = Vec::with_capacity(20);
    out.extend_from_slice(b"XYZ ");
    out.extend_from_slice(&[0; 4]);
    for v in xyz.to_array() {
        out.extend_from_slice(&s15f16_encode(v).to_be_bytes());
    }
    out
}

/// curveType with a single u8.8 entry, read by consumers as a pure
/// power-law gamma.
fn gamma_curve(gamma: f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(14);
    out.extend_from_slice(b"curv");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&1u32.to_be_bytes());
    out.extend_from_slice(&u8f8_encode(gamma).to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let bytes = encode_profile(&ProfileDescriptor::new("Test")).unwrap();

        assert_eq!(&bytes[8..12], &VERSION);
        assert_eq!(&bytes[12..16], b"mntr");
        assert_eq!(&bytes[16..20], b"RGB ");
        assert_eq!(&bytes[20..24], b"XYZ ");
        assert_eq!(&bytes[36..40], b"acsp");
        assert_eq!(&bytes[40..44], b"APPL");

        // Declared size matches actual length
        let declared = u32::from_be_bytes(bytes[0..4].try_into().unwrap());
        assert_eq!(declared as usize, bytes.len());
    }

    #[test]
    fn test_pcs_illuminant_is_d50() {
        let bytes = encode_profile(&ProfileDescriptor::new("Test")).unwrap();
        let x = i32::from_be_bytes(bytes[68..72].try_into().unwrap());
        assert_eq!(x, (0.9642 * 65536.0) as i32);
        let y = i32::from_be_bytes(bytes[72..76].try_into().unwrap());
        assert_eq!(y, 65536);
    }

    #[test]
    fn test_tag_table_sorted_and_aligned() {
        let bytes = encode_profile(&ProfileDescriptor::new("Test")).unwrap();
        let count = u32::from_be_bytes(bytes[128..132].try_into().unwrap()) as usize;
        assert_eq!(count, 10);

        let mut prev_sig = [0u8; 4];
        let mut prev_end = 0usize;
        for i in 0..count {
            let base = 132 + i * 12;
            let sig: [u8; 4] = bytes[base..base + 4].try_into().unwrap();
            let off = u32::from_be_bytes(bytes[base + 4..base + 8].try_into().unwrap()) as usize;
            let len = u32::from_be_bytes(bytes[base + 8..base + 12].try_into().unwrap()) as usize;

            assert!(sig > prev_sig, "tag table not strictly sorted");
            assert_eq!(off % 4, 0, "tag data not 4-byte aligned");
            assert!(off >= prev_end, "tag data regions overlap");
            assert!(off + len <= bytes.len());

            prev_sig = sig;
            prev_end = off + len;
        }
    }

    #[test]
    fn test_recorded_length_is_unpadded() {
        let bytes = encode_profile(&ProfileDescriptor::new("Test")).unwrap();
        let count = u32::from_be_bytes(bytes[128..132].try_into().unwrap()) as usize;
        for i in 0..count {
            let base = 132 + i * 12;
            let sig: [u8; 4] = bytes[base..base + 4].try_into().unwrap();
            let len = u32::from_be_bytes(bytes[base + 8..base + 12].try_into().unwrap()) as usize;
            if &sig == b"rTRC" {
                // curv: 4 sig + 4 reserved + 4 count + 2 value = 14, not 16
                assert_eq!(len, 14);
            }
            if &sig == b"wtpt" {
                assert_eq!(len, 20);
            }
        }
    }

    #[test]
    fn test_non_ascii_description_rejected() {
        let desc = ProfileDescriptor::new("Ekran Profili \u{015f}");
        assert!(matches!(
            encode_profile(&desc),
            Err(IccError::NonAsciiText(_))
        ));
    }

    #[test]
    fn test_write_profile_roundtrip_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.icc");
        write_profile(&path, &ProfileDescriptor::new("Disk Test")).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        let in_memory = encode_profile(&ProfileDescriptor::new("Disk Test")).unwrap();
        // Timestamps may differ across the two encodes; compare sizes and
        // everything outside the dateTimeNumber.
        assert_eq!(on_disk.len(), in_memory.len());
        assert_eq!(&on_disk[..24], &in_memory[..24]);
        assert_eq!(&on_disk[36..], &in_memory[36..]);
    }
}
