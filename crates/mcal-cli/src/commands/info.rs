//! ICC profile inspection command

use crate::InfoArgs;
use anyhow::{Context, Result};
use mcal_icc::read_profile;

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let profile = read_profile(&args.input)
        .with_context(|| format!("Failed to read profile: {}", args.input.display()))?;

    println!("Profile: {}", args.input.display());
    println!("  Size:         {} bytes", profile.size);
    println!(
        "  Version:      {}.{}.{}",
        profile.version[0],
        profile.version[1] >> 4,
        profile.version[1] & 0x0f
    );
    println!("  Class:        {}", sig_str(&profile.device_class));
    println!("  Color space:  {}", sig_str(&profile.color_space));
    println!("  PCS:          {}", sig_str(&profile.pcs));
    println!("  Platform:     {}", sig_str(&profile.platform));

    if let Ok(desc) = profile.description() {
        println!("  Description:  {}", desc);
    }
    if let Ok(cprt) = profile.copyright() {
        println!("  Copyright:    {}", cprt);
    }
    if let Ok(wp) = profile.xyz_tag(b"wtpt") {
        println!("  White point:  ({:.4}, {:.4}, {:.4})", wp.x, wp.y, wp.z);
    }
    if let Ok(g) = profile.gamma_tag(b"rTRC") {
        println!("  Gamma:        {:.2}", g);
    }

    println!("  Tags:         {}", profile.tags.len());
    if verbose {
        for tag in &profile.tags {
            println!(
                "    {}  offset {:6}  length {:6}",
                tag.signature_str(),
                tag.offset,
                tag.length
            );
        }
    }

    Ok(())
}

fn sig_str(sig: &[u8; 4]) -> String {
    String::from_utf8_lossy(sig).trim_end().to_string()
}
