//! Session analysis command

use crate::AnalyzeArgs;
use anyhow::{Result, bail};
use mcal_calibrate::{Ccm, gamma, metrics};
use mcal_core::WhitePoint;
use tracing::debug;

pub fn run(args: AnalyzeArgs, verbose: bool) -> Result<()> {
    let store = super::load_samples(&args.input)?;
    let wp = WhitePoint::parse(&args.wp);
    debug!(samples = store.len(), %wp, "analyzing session");

    let Some(report) = metrics::analyze(&store, wp, args.gamma) else {
        bail!("No samples to analyze");
    };
    let fit = gamma::estimate(&store);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Session: {} ({} samples)", args.input.display(), store.len());
    println!("Target:  {} / gamma {}", report.white_point_target, report.gamma_target);
    println!();
    println!("  Average error (raw):       {:.2}", report.avg_raw);
    println!("  Average error (corrected): {:.2}", report.avg_corrected);
    println!("  Improvement:               {:.1}%", report.improvement_pct);
    match fit {
        gamma::GammaFit::Fitted(g) => println!("  Measured gamma:            {:.2}", g),
        gamma::GammaFit::Fallback { gamma, reason } => {
            println!("  Measured gamma:            {:.1} (default: {})", gamma, reason)
        }
    }
    println!();
    println!("  Grade: {}", report.grade);
    println!("  {}", report.description);

    if verbose {
        if let Some(ccm) = Ccm::solve(&store) {
            println!();
            println!("Correction matrix:");
            for i in 0..3 {
                let row = ccm.matrix().row(i);
                println!("  {:9.4} {:9.4} {:9.4}", row.x, row.y, row.z);
            }
        }
    }

    Ok(())
}
