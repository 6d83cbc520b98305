//! Argyll .ti3 export command

use crate::ExportArgs;
use anyhow::{Context, Result};

pub fn run(args: ExportArgs, verbose: bool) -> Result<()> {
    let store = super::load_samples(&args.input)?;

    mcal_io::ti3::write_ti3(&args.output, &store)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Wrote {} ({} sets)", args.output.display(), store.len());
    if verbose {
        for (i, s) in store.iter().enumerate() {
            println!(
                "  {:3}  target {:3},{:3},{:3}  captured {:3},{:3},{:3}",
                i + 1,
                s.target.r,
                s.target.g,
                s.target.b,
                s.captured.r,
                s.captured.g,
                s.captured.b
            );
        }
    }
    Ok(())
}
