//! Built-in calibration patch sequences.
//!
//! The capture loop is external to this crate; these constants define the
//! standard patch sets it is expected to walk through. Any caller-supplied
//! sequence of RGB triples works equally well - the solver does not care
//! where targets come from.
//!
//! # Sequences
//!
//! - [`PRIMARIES`] - R/G/B/C/M/Y plus white and black endpoints
//! - [`reference_set`] - 18 Macbeth-style standard colors
//! - [`saturation_sweeps`] - primaries and secondaries at 25/50/75/100%
//! - [`gray_wedge`] - 21-step grayscale ramp for gamma estimation
//! - [`full_sequence`] - the complete professional run (63 patches)

use crate::Rgb;

/// Primary, secondary, and endpoint patches.
///
/// White first so downstream consumers can lock exposure against it.
pub const PRIMARIES: [Rgb; 8] = [
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 0),
];

/// Macbeth-style standard reference colors (18 chromatic patches).
pub fn reference_set() -> Vec<Rgb> {
    [
        (115, 82, 68),
        (194, 150, 130),
        (98, 122, 157),
        (129, 149, 65),
        (146, 128, 181),
        (121, 192, 185),
        (214, 126, 44),
        (80, 91, 166),
        (193, 130, 140),
        (94, 60, 108),
        (157, 188, 64),
        (224, 163, 46),
        (56, 61, 150),
        (70, 148, 73),
        (175, 54, 60),
        (231, 199, 31),
        (187, 86, 149),
        (8, 133, 161),
    ]
    .into_iter()
    .map(|(r, g, b)| Rgb::new(r, g, b))
    .collect()
}

/// Saturation sweeps for primaries and secondaries.
///
/// Each of R, G, B, C, M, Y at 25%, 50%, 75%, and 100% drive.
pub fn saturation_sweeps() -> Vec<Rgb> {
    let bases = [
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(0, 0, 255),
        Rgb::new(0, 255, 255),
        Rgb::new(255, 0, 255),
        Rgb::new(255, 255, 0),
    ];
    let mut sweeps = Vec::with_capacity(bases.len() * 4);
    for base in bases {
        for s in [0.25, 0.5, 0.75, 1.0] {
            sweeps.push(Rgb::from_f64(
                base.r as f64 * s,
                base.g as f64 * s,
                base.b as f64 * s,
            ));
        }
    }
    sweeps
}

/// 21-step grayscale wedge.
///
/// Steps of 12.75 code values (truncated), spanning 0 through 255; dense
/// enough for a stable gamma regression after the mid-range filter drops
/// the near-black and near-white ends.
pub fn gray_wedge() -> Vec<Rgb> {
    (0..21)
        .map(|i| {
            let v = (i as f64 * 12.75) as u8;
            Rgb::new(v, v, v)
        })
        .collect()
}

/// The complete professional calibration sequence.
///
/// Reference colors, then saturation sweeps, then the grayscale wedge.
pub fn full_sequence() -> Vec<Rgb> {
    let mut seq = reference_set();
    seq.extend(saturation_sweeps());
    seq.extend(gray_wedge());
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_wedge_is_gray_and_spans_range() {
        let wedge = gray_wedge();
        assert_eq!(wedge.len(), 21);
        assert!(wedge.iter().all(|p| p.is_gray()));
        assert_eq!(wedge[0], Rgb::BLACK);
        assert_eq!(wedge[20], Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_full_sequence_size() {
        // 18 reference + 24 sweeps + 21 gray
        assert_eq!(full_sequence().len(), 63);
    }

    #[test]
    fn test_sweeps_scale_monotonically() {
        let sweeps = saturation_sweeps();
        // First four entries are the red sweep
        assert_eq!(sweeps[3], Rgb::new(255, 0, 0));
        assert!(sweeps[0].r < sweeps[1].r);
        assert!(sweeps[1].r < sweeps[2].r);
    }
}
