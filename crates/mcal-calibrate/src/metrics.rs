//! Quality metrics: color error statistics and grading.
//!
//! The error metric is Euclidean distance in RGB space - an approximate
//! stand-in for a perceptual delta-E, consistent with treating captured
//! RGB as a stand-in for true tristimulus values. Perceptually uniform
//! metrics (CIEDE2000) are out of scope.

use crate::Ccm;
use mcal_core::{Rgb, SampleStore, WhitePoint};
use mcal_math::Vec3;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two colors in RGB space.
///
/// # Example
///
/// ```rust
/// use mcal_core::Rgb;
/// use mcal_calibrate::delta_e;
///
/// let de = delta_e(Rgb::new(255, 0, 0), Rgb::new(255, 0, 0));
/// assert_eq!(de, 0.0);
/// ```
pub fn delta_e(a: Rgb, b: Rgb) -> f64 {
    Vec3::from_array(a.to_f64()).distance(Vec3::from_array(b.to_f64()))
}

/// Qualitative accuracy grade over the average corrected error.
///
/// A monotonic threshold ladder: lower error is never graded worse.
/// Ordered from best to worst so the derived `Ord` ranks grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// Average corrected error below 2: reference-class accuracy.
    Professional,
    /// Below 4: suitable for professional design work.
    Excellent,
    /// Below 8: acceptable for general creative use.
    Fair,
    /// 8 or above: the display needs recalibration.
    NeedsRecalibration,
}

impl Grade {
    /// Grades an average corrected error.
    pub fn from_error(avg_corrected: f64) -> Self {
        if avg_corrected < 2.0 {
            Self::Professional
        } else if avg_corrected < 4.0 {
            Self::Excellent
        } else if avg_corrected < 8.0 {
            Self::Fair
        } else {
            Self::NeedsRecalibration
        }
    }

    /// Operator-facing summary for this grade.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Professional => {
                "Color accuracy is excellent. Differences are imperceptible in normal use."
            }
            Self::Excellent => "Good accuracy, suitable for professional design work.",
            Self::Fair => "Acceptable for general creative use and media consumption.",
            Self::NeedsRecalibration => {
                "Accuracy is below target. Check camera placement and lighting, then recalibrate."
            }
        }
    }

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Professional => "PROFESSIONAL",
            Self::Excellent => "EXCELLENT",
            Self::Fair => "FAIR",
            Self::NeedsRecalibration => "RECALIBRATE",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Calibration quality report for one session.
///
/// A derived, stateless record; every field is recomputed from the store
/// on each call to [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Mean RGB error before correction.
    pub avg_raw: f64,
    /// Mean RGB error after applying the correction matrix.
    pub avg_corrected: f64,
    /// Improvement over raw, in percent. Zero when `avg_raw` is zero;
    /// negative when correction made things worse; never above 100.
    pub improvement_pct: f64,
    /// Qualitative grade over `avg_corrected`.
    pub grade: Grade,
    /// Operator-facing summary text.
    pub description: String,
    /// The illuminant the session targeted.
    pub white_point_target: WhitePoint,
    /// The tone-curve gamma the session targeted.
    pub gamma_target: f64,
}

/// Computes the quality report for a session.
///
/// Returns `None` for an empty store - "no data yet" is a normal state,
/// not an error. When no correction matrix can be solved (fewer than 3
/// samples), corrected error equals raw error.
pub fn analyze(
    store: &SampleStore,
    white_point_target: WhitePoint,
    gamma_target: f64,
) -> Option<PerformanceMetrics> {
    if store.is_empty() {
        return None;
    }

    let ccm = Ccm::solve(store);

    let mut total_raw = 0.0;
    let mut total_corrected = 0.0;
    for s in store.iter() {
        let raw = delta_e(s.target, s.captured);
        total_raw += raw;
        total_corrected += match &ccm {
            Some(ccm) => {
                let corrected = ccm.apply_f64(s.captured);
                corrected.distance(Vec3::from_array(s.target.to_f64()))
            }
            None => raw,
        };
    }

    let n = store.len() as f64;
    let avg_raw = total_raw / n;
    let avg_corrected = total_corrected / n;
    let improvement_pct = if avg_raw > 0.0 {
        (avg_raw - avg_corrected) / avg_raw * 100.0
    } else {
        0.0
    };

    let grade = Grade::from_error(avg_corrected);
    Some(PerformanceMetrics {
        avg_raw,
        avg_corrected,
        improvement_pct,
        grade,
        description: grade.description().to_string(),
        white_point_target,
        gamma_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical_store() -> SampleStore {
        let mut store = SampleStore::new();
        store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
        store.record(Rgb::new(0, 255, 0), Rgb::new(20, 230, 25));
        store.record(Rgb::new(0, 0, 255), Rgb::new(15, 20, 235));
        store.record(Rgb::new(255, 255, 255), Rgb::new(245, 248, 250));
        store
    }

    #[test]
    fn test_empty_store_is_none() {
        let store = SampleStore::new();
        assert!(analyze(&store, WhitePoint::D65, 2.2).is_none());
    }

    #[test]
    fn test_corrected_not_worse_than_raw() {
        let m = analyze(&typical_store(), WhitePoint::D65, 2.2).unwrap();
        assert!(m.avg_corrected <= m.avg_raw);
        assert!(m.improvement_pct >= 0.0);
        assert!(m.improvement_pct <= 100.0);
    }

    #[test]
    fn test_below_solver_threshold_equals_raw() {
        let mut store = SampleStore::new();
        store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
        store.record(Rgb::new(0, 255, 0), Rgb::new(20, 230, 25));

        let m = analyze(&store, WhitePoint::D50, 2.2).unwrap();
        assert_eq!(m.avg_corrected, m.avg_raw);
        assert_eq!(m.improvement_pct, 0.0);
    }

    #[test]
    fn test_perfect_display_improvement_is_zero() {
        let mut store = SampleStore::new();
        for c in [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)] {
            store.record(c, c);
        }
        let m = analyze(&store, WhitePoint::D65, 2.2).unwrap();
        assert_eq!(m.avg_raw, 0.0);
        assert_eq!(m.improvement_pct, 0.0);
        assert_eq!(m.grade, Grade::Professional);
    }

    #[test]
    fn test_grade_ladder() {
        assert_eq!(Grade::from_error(0.0), Grade::Professional);
        assert_eq!(Grade::from_error(1.99), Grade::Professional);
        assert_eq!(Grade::from_error(2.0), Grade::Excellent);
        assert_eq!(Grade::from_error(3.99), Grade::Excellent);
        assert_eq!(Grade::from_error(4.0), Grade::Fair);
        assert_eq!(Grade::from_error(7.99), Grade::Fair);
        assert_eq!(Grade::from_error(8.0), Grade::NeedsRecalibration);
        assert_eq!(Grade::from_error(50.0), Grade::NeedsRecalibration);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let mut prev = Grade::Professional;
        for e in 0..200 {
            let g = Grade::from_error(e as f64 / 10.0);
            assert!(g >= prev, "grade regressed at error {}", e);
            prev = g;
        }
    }

    #[test]
    fn test_report_carries_targets() {
        let m = analyze(&typical_store(), WhitePoint::D65, 2.4).unwrap();
        assert_eq!(m.white_point_target, WhitePoint::D65);
        assert_eq!(m.gamma_target, 2.4);
    }
}
