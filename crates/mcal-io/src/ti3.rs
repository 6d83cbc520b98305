//! Argyll CMS `.ti3` measurement-set export.
//!
//! A line-oriented text format consumed by Argyll's profiling tools. The
//! emitted block mirrors what downstream tooling was built against,
//! including the historical `NUMBER_OF_FIELDS 6` declaration paired with
//! a seven-name format line - Argyll's parser keys on the format line.
//!
//! # Format
//!
//! ```text
//! CTI3
//!
//! DESCRIPTOR "Argyll Device RGB measurements"
//! ORIGIN "mcal display calibrator"
//! DEVICE_CLASS "DISPLAY"
//! COLOR_REP "RGB"
//!
//! NUMBER_OF_FIELDS 6
//! BEGIN_DATA_FORMAT
//! RGB_R RGB_G RGB_B SAMPLE_ID XYZ_X XYZ_Y XYZ_Z
//! END_DATA_FORMAT
//!
//! NUMBER_OF_SETS 2
//! BEGIN_DATA
//! 1.0000 0.0000 0.0000 1 240 10 15
//! 0.0000 1.0000 0.0000 2 20 230 25
//! END_DATA
//! ```
//!
//! Each data line carries the target channels normalized to [0, 1] at 4
//! decimal places, the 1-based sample index, and the three raw captured
//! channel integers standing in for XYZ.

use crate::error::{IoError, IoResult};
use crate::publish::write_atomic;
use mcal_core::{Rgb, SampleStore};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Writes a measurement set to a `.ti3` file.
///
/// Returns [`IoError::Empty`] for an empty store. The file is published
/// atomically; a failed write leaves nothing at `path`.
pub fn write_ti3<P: AsRef<Path>>(path: P, store: &SampleStore) -> IoResult<()> {
    if store.is_empty() {
        return Err(IoError::Empty);
    }
    write_atomic(path.as_ref(), |w| emit_ti3(w, store))
}

/// Writes a measurement set to any writer.
pub fn emit_ti3<W: Write>(writer: &mut W, store: &SampleStore) -> IoResult<()> {
    writeln!(writer, "CTI3")?;
    writeln!(writer)?;
    writeln!(writer, "DESCRIPTOR \"Argyll Device RGB measurements\"")?;
    writeln!(writer, "ORIGIN \"mcal display calibrator\"")?;
    writeln!(writer, "DEVICE_CLASS \"DISPLAY\"")?;
    writeln!(writer, "COLOR_REP \"RGB\"")?;
    writeln!(writer)?;
    writeln!(writer, "NUMBER_OF_FIELDS 6")?;
    writeln!(writer, "BEGIN_DATA_FORMAT")?;
    writeln!(writer, "RGB_R RGB_G RGB_B SAMPLE_ID XYZ_X XYZ_Y XYZ_Z")?;
    writeln!(writer, "END_DATA_FORMAT")?;
    writeln!(writer)?;
    writeln!(writer, "NUMBER_OF_SETS {}", store.len())?;
    writeln!(writer, "BEGIN_DATA")?;
    for (i, s) in store.iter().enumerate() {
        writeln!(
            writer,
            "{:.4} {:.4} {:.4} {} {} {} {}",
            s.target.r as f64 / 255.0,
            s.target.g as f64 / 255.0,
            s.target.b as f64 / 255.0,
            i + 1,
            s.captured.r,
            s.captured.g,
            s.captured.b,
        )?;
    }
    writeln!(writer, "END_DATA")?;
    Ok(())
}

/// Reads a measurement set written by [`write_ti3`].
///
/// Only the data block is interpreted; header metadata is skipped.
pub fn read_ti3<P: AsRef<Path>>(path: P) -> IoResult<SampleStore> {
    let file = File::open(path.as_ref())?;
    parse_ti3(BufReader::new(file))
}

/// Parses a measurement set from a reader.
pub fn parse_ti3<R: BufRead>(reader: R) -> IoResult<SampleStore> {
    let mut store = SampleStore::new();
    let mut declared: Option<usize> = None;
    let mut in_data = false;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(count) = line.strip_prefix("NUMBER_OF_SETS") {
            declared = Some(
                count
                    .trim()
                    .parse()
                    .map_err(|_| IoError::Parse("invalid NUMBER_OF_SETS".into()))?,
            );
        } else if line == "BEGIN_DATA" {
            in_data = true;
        } else if line == "END_DATA" {
            in_data = false;
        } else if in_data {
            let (target, captured) = parse_data_line(line)?;
            store.record(target, captured);
        }
    }

    if let Some(expected) = declared {
        if store.len() != expected {
            return Err(IoError::Parse(format!(
                "expected {} sets, found {}",
                expected,
                store.len()
            )));
        }
    }
    Ok(store)
}

fn parse_data_line(line: &str) -> IoResult<(Rgb, Rgb)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 7 {
        return Err(IoError::Parse(format!("short data line: {}", line)));
    }

    let norm = |s: &str| -> IoResult<u8> {
        let v: f64 = s
            .parse()
            .map_err(|_| IoError::Parse(format!("invalid target field: {}", s)))?;
        Ok((v * 255.0).round().clamp(0.0, 255.0) as u8)
    };
    let raw = |s: &str| -> IoResult<u8> {
        s.parse()
            .map_err(|_| IoError::Parse(format!("invalid captured field: {}", s)))
    };

    let target = Rgb::new(norm(parts[0])?, norm(parts[1])?, norm(parts[2])?);
    let captured = Rgb::new(raw(parts[4])?, raw(parts[5])?, raw(parts[6])?);
    Ok((target, captured))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_store() -> SampleStore {
        let mut store = SampleStore::new();
        store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
        store.record(Rgb::new(0, 255, 0), Rgb::new(20, 230, 25));
        store.record(Rgb::new(128, 128, 128), Rgb::new(120, 121, 119));
        store
    }

    #[test]
    fn test_emit_header_block() {
        let mut out = Vec::new();
        emit_ti3(&mut out, &sample_store()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("CTI3\n"));
        assert!(text.contains("DEVICE_CLASS \"DISPLAY\""));
        assert!(text.contains("NUMBER_OF_FIELDS 6"));
        assert!(text.contains("RGB_R RGB_G RGB_B SAMPLE_ID XYZ_X XYZ_Y XYZ_Z"));
        assert!(text.contains("NUMBER_OF_SETS 3"));
    }

    #[test]
    fn test_data_line_format() {
        let mut out = Vec::new();
        emit_ti3(&mut out, &sample_store()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("1.0000 0.0000 0.0000 1 240 10 15"));
        assert!(text.contains("0.0000 1.0000 0.0000 2 20 230 25"));
        assert!(text.contains("0.5020 0.5020 0.5020 3 120 121 119"));
    }

    #[test]
    fn test_roundtrip() {
        let store = sample_store();
        let mut out = Vec::new();
        emit_ti3(&mut out, &store).unwrap();

        let parsed = parse_ti3(Cursor::new(out)).unwrap();
        assert_eq!(parsed.len(), store.len());
        for (a, b) in parsed.iter().zip(store.iter()) {
            assert_eq!(a.target, b.target);
            assert_eq!(a.captured, b.captured);
        }
    }

    #[test]
    fn test_empty_store_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.ti3");
        assert!(matches!(
            write_ti3(&path, &SampleStore::new()),
            Err(IoError::Empty)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so the write cannot start
        let path = dir.path().join("missing").join("out.ti3");
        assert!(write_ti3(&path, &sample_store()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_leaves_only_the_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ti3");
        write_ti3(&path, &sample_store()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["session.ti3"]);
    }

    #[test]
    fn test_set_count_mismatch_rejected() {
        let text = "CTI3\nNUMBER_OF_SETS 5\nBEGIN_DATA\n1.0 0.0 0.0 1 240 10 15\nEND_DATA\n";
        assert!(matches!(
            parse_ti3(Cursor::new(text)),
            Err(IoError::Parse(_))
        ));
    }
}
