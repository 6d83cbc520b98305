//! Plain CSV sample files and the session log.
//!
//! The capture loop hands its measurements over as a CSV with one sample
//! per line:
//!
//! ```text
//! # target_r,target_g,target_b,captured_r,captured_g,captured_b
//! 255,0,0,240,10,15
//! 0,255,0,20,230,25
//! ```
//!
//! `#` starts a comment; blank lines are skipped. The session log is the
//! same data annotated with a per-row delta-E for operator review.

use crate::error::{IoError, IoResult};
use crate::publish::write_atomic;
use mcal_calibrate::delta_e;
use mcal_core::{Rgb, SampleStore};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Reads a sample CSV file into a store.
pub fn read_samples<P: AsRef<Path>>(path: P) -> IoResult<SampleStore> {
    let file = File::open(path.as_ref())?;
    parse_samples(BufReader::new(file))
}

/// Parses sample CSV from a reader.
pub fn parse_samples<R: BufRead>(reader: R) -> IoResult<SampleStore> {
    let mut store = SampleStore::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 6 {
            return Err(IoError::Parse(format!(
                "expected 6 fields, found {}: {}",
                fields.len(),
                line
            )));
        }

        let mut values = [0u8; 6];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|_| IoError::Parse(format!("invalid channel value: {}", field)))?;
        }

        store.record(
            Rgb::new(values[0], values[1], values[2]),
            Rgb::new(values[3], values[4], values[5]),
        );
    }

    Ok(store)
}

/// Writes a store as a sample CSV file, published atomically.
pub fn write_samples<P: AsRef<Path>>(path: P, store: &SampleStore) -> IoResult<()> {
    write_atomic(path.as_ref(), |w| emit_samples(w, store))
}

/// Writes a sample CSV to any writer.
pub fn emit_samples<W: Write>(writer: &mut W, store: &SampleStore) -> IoResult<()> {
    writeln!(
        writer,
        "# target_r,target_g,target_b,captured_r,captured_g,captured_b"
    )?;
    for s in store.iter() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            s.target.r, s.target.g, s.target.b, s.captured.r, s.captured.g, s.captured.b
        )?;
    }
    Ok(())
}

/// Writes the session log: every sample with its raw delta-E, 1-based.
/// Published atomically like the other exports.
pub fn write_log<P: AsRef<Path>>(path: P, store: &SampleStore) -> IoResult<()> {
    write_atomic(path.as_ref(), |w| emit_log(w, store))
}

/// Writes the session log to any writer.
pub fn emit_log<W: Write>(writer: &mut W, store: &SampleStore) -> IoResult<()> {
    writeln!(
        writer,
        "step,target_r,target_g,target_b,captured_r,captured_g,captured_b,delta_e"
    )?;
    for (i, s) in store.iter().enumerate() {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{:.2}",
            i + 1,
            s.target.r,
            s.target.g,
            s.target.b,
            s.captured.r,
            s.captured.g,
            s.captured.b,
            delta_e(s.target, s.captured),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_with_comments_and_blanks() {
        let csv = "# header\n\n255,0,0,240,10,15\n  0, 255, 0, 20, 230, 25\n";
        let store = parse_samples(Cursor::new(csv)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.samples()[1].target, Rgb::new(0, 255, 0));
        assert_eq!(store.samples()[1].captured, Rgb::new(20, 230, 25));
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let csv = "255,0,0,240,10\n";
        assert!(matches!(
            parse_samples(Cursor::new(csv)),
            Err(IoError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let csv = "300,0,0,240,10,15\n";
        assert!(matches!(
            parse_samples(Cursor::new(csv)),
            Err(IoError::Parse(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let mut store = SampleStore::new();
        store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
        store.record(Rgb::new(128, 128, 128), Rgb::new(120, 121, 119));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        write_samples(&path, &store).unwrap();
        let loaded = read_samples(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.samples(), store.samples());
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let mut store = SampleStore::new();
        store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("samples.csv");
        assert!(write_samples(&path, &store).is_err());
        assert!(!path.exists());
        assert!(write_log(&path, &store).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_log_has_delta_e_column() {
        let mut store = SampleStore::new();
        store.record(Rgb::new(255, 0, 0), Rgb::new(255, 0, 0));

        let mut out = Vec::new();
        emit_log(&mut out, &store).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().ends_with("delta_e"));
        assert!(text.contains("1,255,0,0,255,0,0,0.00"));
    }
}
