//! Display gamma estimation from grayscale measurements.
//!
//! Fits the decoding exponent `γ` of the model
//! `luminance_ratio ≈ code_ratio ^ γ` over the session's grayscale
//! samples. The fit is a least-squares slope through the origin in
//! log-log space, which is exactly that power-law model with no
//! intercept.
//!
//! # Filtering
//!
//! Only a stable mid-range participates in the fit: normalized target
//! code in (0.1, 0.95) and normalized measured luminance above 0.05.
//! Near-black readings are dominated by sensor noise and near-white
//! readings by clipping; both skew the slope badly if included.
//!
//! # Fallback rule
//!
//! A fitted exponent outside [1.2, 2.8] is almost certainly an
//! auto-exposure or measurement artifact, not a real display gamma, and
//! is replaced by the 2.2 default. The substitution is an explicit,
//! testable outcome ([`GammaFit::Fallback`] with a reason), and is also
//! logged so an operator can see it happened.

use mcal_core::SampleStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default exponent used whenever a trustworthy fit is unavailable.
pub const DEFAULT_GAMMA: f64 = 2.2;

/// Lower bound of the plausible display gamma band.
pub const GAMMA_MIN: f64 = 1.2;

/// Upper bound of the plausible display gamma band.
pub const GAMMA_MAX: f64 = 2.8;

/// Minimum filtered grayscale points for a regression.
pub const MIN_POINTS: usize = 3;

/// Normalized target code must exceed this to enter the fit.
const CODE_LO: f64 = 0.1;

/// Normalized target code must stay below this to enter the fit.
const CODE_HI: f64 = 0.95;

/// Normalized measured luminance must exceed this to enter the fit.
const LUM_LO: f64 = 0.05;

/// Why a gamma fit fell back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Fewer than [`MIN_POINTS`] usable grayscale points after filtering.
    TooFewPoints,
    /// The regression produced an exponent outside [[`GAMMA_MIN`],
    /// [`GAMMA_MAX`]]; the implausible value is carried for reporting.
    OutOfRange(f64),
    /// The regression itself degenerated (non-finite slope or zero
    /// variance in the predictor).
    Degenerate,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints => write!(f, "too few usable grayscale points"),
            Self::OutOfRange(g) => write!(f, "fitted gamma {:.2} outside plausible range", g),
            Self::Degenerate => write!(f, "regression degenerated"),
        }
    }
}

/// Outcome of a gamma estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GammaFit {
    /// A trustworthy fitted exponent.
    Fitted(f64),
    /// The default was substituted; the reason says why.
    Fallback {
        /// The substituted exponent (always [`DEFAULT_GAMMA`]).
        gamma: f64,
        /// Why the fit was rejected.
        reason: FallbackReason,
    },
}

impl GammaFit {
    /// The exponent to use, fitted or substituted.
    pub fn value(&self) -> f64 {
        match self {
            Self::Fitted(g) => *g,
            Self::Fallback { gamma, .. } => *gamma,
        }
    }

    /// True if the default was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

fn fallback(reason: FallbackReason) -> GammaFit {
    warn!(%reason, default = DEFAULT_GAMMA, "gamma fit rejected, using default");
    GammaFit::Fallback {
        gamma: DEFAULT_GAMMA,
        reason,
    }
}

/// Estimates the display gamma from a session's grayscale samples.
///
/// Never fails: any shortfall or numerical anomaly yields the 2.2
/// fallback with a reason.
///
/// # Example
///
/// ```rust
/// use mcal_core::{Rgb, SampleStore};
/// use mcal_calibrate::gamma;
///
/// let mut store = SampleStore::new();
/// for code in [64u8, 96, 128, 160, 192, 224] {
///     let c = code as f64 / 255.0;
///     let lum = (c.powf(2.2) * 255.0).round() as u8;
///     store.record(Rgb::new(code, code, code), Rgb::new(lum, lum, lum));
/// }
/// let fit = gamma::estimate(&store);
/// assert!((fit.value() - 2.2).abs() < 0.05);
/// ```
pub fn estimate(store: &SampleStore) -> GammaFit {
    // (log code_ratio, log luminance_ratio) pairs from the mid-range
    let points: Vec<(f64, f64)> = store
        .gray_ramp()
        .iter()
        .filter_map(|s| {
            let code = s.target.luminance() / 255.0;
            let lum = s.captured.luminance() / 255.0;
            (code > CODE_LO && code < CODE_HI && lum > LUM_LO)
                .then(|| (code.ln(), lum.ln()))
        })
        .collect();

    if points.len() < MIN_POINTS {
        return fallback(FallbackReason::TooFewPoints);
    }

    // Slope through the origin: gamma = sum(x*y) / sum(x^2)
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    if sum_xx <= 0.0 || !sum_xx.is_finite() || !sum_xy.is_finite() {
        return fallback(FallbackReason::Degenerate);
    }

    let gamma = sum_xy / sum_xx;
    if !gamma.is_finite() {
        return fallback(FallbackReason::Degenerate);
    }
    if !(GAMMA_MIN..=GAMMA_MAX).contains(&gamma) {
        return fallback(FallbackReason::OutOfRange(gamma));
    }

    GammaFit::Fitted(gamma)
}
