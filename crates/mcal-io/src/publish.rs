//! Atomic publication of text exports.
//!
//! Every exporter writes to a temporary file in the destination
//! directory and renames it into place, so a failed write never leaves
//! a truncated file at the destination.

use crate::error::{IoError, IoResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Runs `emit` against a buffered temp-file writer, then renames the
/// temp file onto `path`.
pub(crate) fn write_atomic<F>(path: &Path, emit: F) -> IoResult<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> IoResult<()>,
{
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };

    let mut writer = BufWriter::new(tmp.as_file_mut());
    emit(&mut writer)?;
    writer.flush()?;
    drop(writer);

    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}
