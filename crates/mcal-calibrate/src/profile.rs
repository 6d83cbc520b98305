//! Profile descriptor derivation from session measurements.
//!
//! Maps the measured white/red/green/blue reference patches to the XYZ
//! values an ICC display profile carries. The captured channel values are
//! normalized against the measured white patch, then scaled by the
//! *target* illuminant - the profile always claims the chosen standard
//! white point while primaries scale proportionally to it.
//!
//! This is a deliberate simplification standing in for a true
//! colorimetric characterization: no chromatic adaptation (e.g. Bradford)
//! is performed between the measured and target illuminants. A fully
//! colorimetric pipeline would adapt measured XYZ instead of rescaling.

use crate::gamma::GammaFit;
use mcal_core::{Rgb, SampleStore, WhitePoint, Xyz};
use mcal_icc::ProfileDescriptor;
use tracing::debug;

/// Derives a profile descriptor from a session.
///
/// Uses the samples whose targets are pure white/red/green/blue to place
/// the primaries; any reference patch missing from the store leaves the
/// descriptor's sRGB default for that primary. Returns `None` for an
/// empty store.
///
/// # Example
///
/// ```rust
/// use mcal_core::{Rgb, SampleStore, WhitePoint};
/// use mcal_calibrate::{derive_descriptor, gamma};
///
/// let mut store = SampleStore::new();
/// store.record(Rgb::new(255, 255, 255), Rgb::new(245, 248, 250));
/// store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
///
/// let fit = gamma::estimate(&store);
/// let desc = derive_descriptor(&store, WhitePoint::D65, &fit, "My Display").unwrap();
/// assert_eq!(desc.white_point, WhitePoint::D65.xyz());
/// ```
pub fn derive_descriptor(
    store: &SampleStore,
    target: WhitePoint,
    gamma: &GammaFit,
    description: &str,
) -> Option<ProfileDescriptor> {
    if store.is_empty() {
        return None;
    }

    let target_xyz = target.xyz();
    let mut desc = ProfileDescriptor::new(description)
        .with_white_point(target_xyz)
        .with_gamma(gamma.value());

    let white = store.find_target(Rgb::WHITE).map(|s| s.captured);
    let Some(white) = white else {
        debug!("no white reference patch; keeping sRGB default primaries");
        return Some(desc);
    };

    // Guard against a black or clipped-to-zero white capture
    let white_sum = white.r as f64 + white.g as f64 + white.b as f64;
    if white_sum < 1.0 {
        debug!("white reference patch is black; keeping sRGB default primaries");
        return Some(desc);
    }

    let primary = |target_patch: Rgb, fallback: Xyz| -> Xyz {
        match store.find_target(target_patch) {
            Some(s) => scaled_primary(s.captured, white, target_xyz),
            None => fallback,
        }
    };

    let red = primary(Rgb::new(255, 0, 0), desc.red);
    let green = primary(Rgb::new(0, 255, 0), desc.green);
    let blue = primary(Rgb::new(0, 0, 255), desc.blue);
    desc = desc.with_primaries(red, green, blue);

    Some(desc)
}

/// Scales one measured primary into XYZ against the measured white and
/// the target illuminant.
///
/// Each captured channel is normalized by the corresponding white
/// channel, then the normalized triple is scaled component-wise by the
/// target white XYZ.
fn scaled_primary(captured: Rgb, white: Rgb, target_xyz: Xyz) -> Xyz {
    let norm = |c: u8, w: u8| -> f64 {
        let w = (w as f64).max(1.0);
        (c as f64 / w).clamp(0.0, 1.0)
    };
    Xyz::new(
        norm(captured.r, white.r) * target_xyz.x,
        norm(captured.g, white.g) * target_xyz.y,
        norm(captured.b, white.b) * target_xyz.z,
    )
}
