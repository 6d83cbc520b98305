//! ICC profile generation command

use crate::ProfileArgs;
use anyhow::{Context, Result, bail};
use mcal_calibrate::{GammaFit, derive_descriptor, gamma};
use mcal_core::WhitePoint;

pub fn run(args: ProfileArgs, verbose: bool) -> Result<()> {
    let store = super::load_samples(&args.input)?;
    let wp = WhitePoint::parse(&args.wp);

    // estimate() logs the fallback itself; the summary below marks it too
    let fit = match args.gamma {
        Some(g) => GammaFit::Fitted(g),
        None => gamma::estimate(&store),
    };

    let Some(mut desc) = derive_descriptor(&store, wp, &fit, &args.desc) else {
        bail!("No samples to profile");
    };
    if let Some(copyright) = args.copyright {
        desc = desc.with_copyright(copyright);
    }

    mcal_icc::write_profile(&args.output, &desc)
        .with_context(|| format!("Failed to write profile: {}", args.output.display()))?;

    println!("Wrote {}", args.output.display());
    println!("  White point: {} ({:.4}, {:.4}, {:.4})", wp, desc.white_point.x, desc.white_point.y, desc.white_point.z);
    println!("  Gamma:       {:.2}{}", desc.gamma, if fit.is_fallback() { " (default)" } else { "" });

    if verbose {
        println!("  Red:         ({:.4}, {:.4}, {:.4})", desc.red.x, desc.red.y, desc.red.z);
        println!("  Green:       ({:.4}, {:.4}, {:.4})", desc.green.x, desc.green.y, desc.green.z);
        println!("  Blue:        ({:.4}, {:.4}, {:.4})", desc.blue.x, desc.blue.y, desc.blue.z);
    }

    Ok(())
}
