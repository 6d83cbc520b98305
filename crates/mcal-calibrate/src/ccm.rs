//! Color-correction matrix solving.
//!
//! The correction model is a pure linear map through the origin:
//! `captured_row * M ≈ target_row`, solved over all samples in the
//! least-squares sense. No offset term is modeled - this trades accuracy
//! on near-black patches for a smaller model. The matrix is not
//! constrained to be diagonal or positive; camera channel crosstalk is
//! expected to appear in the off-diagonal terms.

use mcal_core::{Rgb, SampleStore};
use mcal_math::{Mat3, Vec3, lstsq};

/// Minimum sample count for a 3x3 solve.
pub const MIN_SAMPLES: usize = 3;

/// A 3x3 color-correction matrix mapping captured RGB to target RGB.
///
/// Valid only for the store contents it was solved from; re-solve after
/// recording further samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ccm {
    matrix: Mat3,
}

impl Ccm {
    /// The identity correction (leaves colors unchanged).
    pub const IDENTITY: Self = Self {
        matrix: Mat3::IDENTITY,
    };

    /// Solves the least-squares correction matrix for a store.
    ///
    /// Returns `None` with fewer than [`MIN_SAMPLES`] samples. Degenerate
    /// or colinear sample sets still produce a best-effort matrix; a high
    /// residual is data, not a fault.
    pub fn solve(store: &SampleStore) -> Option<Self> {
        if store.len() < MIN_SAMPLES {
            return None;
        }

        let captured: Vec<Vec3> = store
            .iter()
            .map(|s| Vec3::from_array(s.captured.to_f64()))
            .collect();
        let target: Vec<Vec3> = store
            .iter()
            .map(|s| Vec3::from_array(s.target.to_f64()))
            .collect();

        lstsq::solve_rows(&captured, &target).map(|matrix| Self { matrix })
    }

    /// Wraps an explicit matrix.
    pub const fn from_matrix(matrix: Mat3) -> Self {
        Self { matrix }
    }

    /// The underlying 3x3 matrix.
    pub const fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// Applies the correction to a captured color, clamping each channel
    /// to [0, 255].
    pub fn apply(&self, captured: Rgb) -> Rgb {
        let out = Vec3::from_array(captured.to_f64()) * self.matrix;
        Rgb::from_f64(out.x, out.y, out.z)
    }

    /// Corrected color without quantization, clamped to [0, 255].
    ///
    /// The analyzer measures error on this continuous value so that
    /// rounding does not mask sub-code-value improvements.
    pub fn apply_f64(&self, captured: Rgb) -> Vec3 {
        (Vec3::from_array(captured.to_f64()) * self.matrix).clamp(0.0, 255.0)
    }

    /// Mean squared residual of the correction over a store.
    pub fn mean_squared_residual(&self, store: &SampleStore) -> f64 {
        if store.is_empty() {
            return 0.0;
        }
        let sum: f64 = store
            .iter()
            .map(|s| {
                let corrected = self.apply_f64(s.captured);
                let target = Vec3::from_array(s.target.to_f64());
                corrected.distance(target).powi(2)
            })
            .sum();
        sum / store.len() as f64
    }
}
