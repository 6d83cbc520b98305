//! Least-squares solver for stacked row systems.
//!
//! Solves `A * X = B` for the 3x3 matrix `X` minimizing `||A*X - B||`,
//! where `A` and `B` stack one measurement per row. This is the core of
//! color-correction solving: `A` holds captured RGB rows, `B` the
//! commanded targets.
//!
//! The solve goes through nalgebra's SVD, which acts as a Moore-Penrose
//! pseudo-inverse: rank-deficient or colinear sample stacks yield a
//! best-effort minimum-norm solution instead of an error. Callers must
//! treat a high-residual result as valid data.

use crate::{Mat3, Vec3};
use nalgebra::DMatrix;

/// Singular values below this fraction of the largest are treated as zero.
const RANK_EPS: f64 = 1e-10;

/// Solves `A * X = B` in the least-squares sense for 3x3 `X`.
///
/// `a` and `b` are row stacks of equal length. Returns `None` when fewer
/// than 3 rows are supplied (a 3x3 system needs at least 3 equations per
/// column) or when the result is non-finite; rank deficiency alone does
/// not fail.
///
/// # Example
///
/// ```rust
/// use mcal_math::{Vec3, lstsq};
///
/// let rows = vec![
///     Vec3::new(1.0, 0.0, 0.0),
///     Vec3::new(0.0, 1.0, 0.0),
///     Vec3::new(0.0, 0.0, 1.0),
/// ];
/// // Identity system recovers the identity matrix
/// let m = lstsq::solve_rows(&rows, &rows).unwrap();
/// assert!((m.m[0][0] - 1.0).abs() < 1e-9);
/// assert!(m.m[0][1].abs() < 1e-9);
/// ```
pub fn solve_rows(a: &[Vec3], b: &[Vec3]) -> Option<Mat3> {
    let n = a.len();
    if n < 3 || b.len() != n {
        return None;
    }

    let a_mat = DMatrix::from_fn(n, 3, |r, c| a[r][c]);
    let b_mat = DMatrix::from_fn(n, 3, |r, c| b[r][c]);

    let svd = a_mat.svd(true, true);
    let x = svd.solve(&b_mat, RANK_EPS).ok()?;

    let out = Mat3::from_rows([
        [x[(0, 0)], x[(0, 1)], x[(0, 2)]],
        [x[(1, 0)], x[(1, 1)], x[(1, 2)]],
        [x[(2, 0)], x[(2, 1)], x[(2, 2)]],
    ]);

    out.is_finite().then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_system() {
        let rows = vec![
            Vec3::new(255.0, 0.0, 0.0),
            Vec3::new(0.0, 255.0, 0.0),
            Vec3::new(0.0, 0.0, 255.0),
            Vec3::new(255.0, 255.0, 255.0),
        ];
        let m = solve_rows(&rows, &rows).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(m.m[i][j], expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_exact_diagonal_gain() {
        // captured * M = target with per-channel gains 2, 0.5, 1
        let captured = vec![
            Vec3::new(10.0, 40.0, 30.0),
            Vec3::new(50.0, 20.0, 60.0),
            Vec3::new(70.0, 80.0, 90.0),
        ];
        let target: Vec<Vec3> = captured
            .iter()
            .map(|v| Vec3::new(v.x * 2.0, v.y * 0.5, v.z))
            .collect();

        let m = solve_rows(&captured, &target).unwrap();
        assert_abs_diff_eq!(m.m[0][0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.m[1][1], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(m.m[2][2], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.m[0][1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_too_few_rows() {
        let rows = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
        assert!(solve_rows(&rows, &rows).is_none());
    }

    #[test]
    fn test_rank_deficient_does_not_fail() {
        // All rows colinear: rank 1. SVD must still produce a finite
        // minimum-norm solution.
        let captured = vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::new(3.0, 3.0, 3.0),
        ];
        let target = vec![
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::new(4.0, 4.0, 4.0),
            Vec3::new(6.0, 6.0, 6.0),
        ];
        let m = solve_rows(&captured, &target).expect("degenerate solve must succeed");
        assert!(m.is_finite());
        // The fit still reproduces the observations
        let out = captured[0] * m;
        assert!((out.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_overdetermined_residual_beats_identity() {
        let captured = vec![
            Vec3::new(240.0, 10.0, 15.0),
            Vec3::new(20.0, 230.0, 25.0),
            Vec3::new(15.0, 20.0, 235.0),
            Vec3::new(245.0, 248.0, 250.0),
        ];
        let target = vec![
            Vec3::new(255.0, 0.0, 0.0),
            Vec3::new(0.0, 255.0, 0.0),
            Vec3::new(0.0, 0.0, 255.0),
            Vec3::new(255.0, 255.0, 255.0),
        ];

        let m = solve_rows(&captured, &target).unwrap();

        let residual = |mat: Mat3| -> f64 {
            captured
                .iter()
                .zip(&target)
                .map(|(c, t)| (*c * mat).distance(*t).powi(2))
                .sum()
        };

        assert!(residual(m) <= residual(Mat3::IDENTITY));
    }
}
