//! CLI command implementations

pub mod analyze;
pub mod export;
pub mod info;
pub mod profile;

use anyhow::{Context, Result, bail};
use mcal_core::SampleStore;
use std::path::Path;

/// Load a sample CSV, failing on empty sessions.
pub fn load_samples(path: &Path) -> Result<SampleStore> {
    let store = mcal_io::samples::read_samples(path)
        .with_context(|| format!("Failed to load samples: {}", path.display()))?;
    if store.is_empty() {
        bail!("No samples in {}", path.display());
    }
    Ok(store)
}
