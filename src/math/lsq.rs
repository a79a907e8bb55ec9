//! Small dense least-squares solves.
//!
//! The optimizer repeatedly solves damped normal equations
//! `(J^T J + lambda * D) delta = J^T r` for tiny parameter dimensions
//! (a handful of peaks, 3 parameters each), and the smoother solves one
//! 21x5 polynomial regression per window.
//!
//! Implementation choices:
//! - Cholesky first: the damped system is symmetric and, away from
//!   degeneracies, positive definite.
//! - SVD fallback with a relaxed tolerance ladder for near-singular
//!   systems (overlapping peaks produce nearly collinear Jacobian
//!   columns).

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve a symmetric (damped normal-equation) system.
///
/// Cholesky when the matrix is positive definite, SVD otherwise. `None`
/// means the step is unusable and the caller should increase damping.
pub fn solve_symmetric(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if let Some(chol) = a.clone().cholesky() {
        let x = chol.solve(b);
        if x.iter().all(|v| v.is_finite()) {
            return Some(x);
        }
    }
    solve_least_squares(a, b)
}
