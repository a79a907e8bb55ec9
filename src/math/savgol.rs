//! Savitzky-Golay smoothing.
//!
//! Each output sample is the value at the window center of a least-squares
//! polynomial fit over a fixed odd-length window. Interior samples use a
//! centered window; the first and last half-windows reuse the polynomial
//! fitted to the first/last full window, evaluated at the off-center
//! offsets, so the output keeps the source length without shrinking the
//! window.

use nalgebra::{DMatrix, DVector};

use crate::math::solve_least_squares;

/// Polynomial-fit design matrix over window offsets
/// `-half..=half`: row `i` is `[1, d, d^2, ..., d^order]`.
fn window_design(window: usize, order: usize) -> DMatrix<f64> {
    let half = (window / 2) as isize;
    DMatrix::from_fn(window, order + 1, |i, j| {
        let d = (i as isize - half) as f64;
        d.powi(j as i32)
    })
}

fn poly_eval(beta: &DVector<f64>, d: f64) -> f64 {
    let mut value = 0.0;
    let mut power = 1.0;
    for &coeff in beta.iter() {
        value += coeff * power;
        power *= d;
    }
    value
}

/// Smooth `y` with a Savitzky-Golay filter of the given odd `window` and
/// polynomial `order`.
///
/// Returns `None` when the input is shorter than the window or a window
/// regression cannot be solved; callers treat both as an estimation
/// precondition failure rather than silently truncating.
pub fn savgol_smooth(y: &[f64], window: usize, order: usize) -> Option<Vec<f64>> {
    debug_assert!(window % 2 == 1);
    debug_assert!(order < window);
    let n = y.len();
    if n < window {
        return None;
    }

    let half = window / 2;
    let design = window_design(window, order);
    let mut smoothed = vec![0.0; n];

    // Interior: centered windows, value at offset 0 is the constant term.
    for center in half..n - half {
        let win = DVector::from_row_slice(&y[center - half..center + half + 1]);
        let beta = solve_least_squares(&design, &win)?;
        smoothed[center] = beta[0];
    }

    // Edges: evaluate the first/last full-window polynomial off-center.
    let first = DVector::from_row_slice(&y[..window]);
    let beta = solve_least_squares(&design, &first)?;
    for (i, slot) in smoothed.iter_mut().take(half).enumerate() {
        *slot = poly_eval(&beta, i as f64 - half as f64);
    }

    let last = DVector::from_row_slice(&y[n - window..]);
    let beta = solve_least_squares(&design, &last)?;
    for (offset, i) in (n - half..n).enumerate() {
        smoothed[i] = poly_eval(&beta, offset as f64 + 1.0);
    }

    Some(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_input_is_rejected() {
        let y = vec![1.0; 20];
        assert!(savgol_smooth(&y, 21, 4).is_none());
        assert!(savgol_smooth(&y, 11, 4).is_some());
    }

    #[test]
    fn quartic_polynomials_pass_through_unchanged() {
        // A 4th-order filter reproduces any polynomial of degree <= 4
        // exactly, including at the edges.
        let y: Vec<f64> = (0..60)
            .map(|i| {
                let x = i as f64 * 0.1;
                1.5 + 0.8 * x - 0.3 * x * x + 0.02 * x.powi(3) - 0.001 * x.powi(4)
            })
            .collect();

        let smoothed = savgol_smooth(&y, 21, 4).unwrap();
        assert_eq!(smoothed.len(), y.len());
        for (s, v) in smoothed.iter().zip(&y) {
            assert!((s - v).abs() < 1e-8, "{s} vs {v}");
        }
    }

    #[test]
    fn noise_variance_is_reduced() {
        // Deterministic pseudo-noise on top of a slow ramp.
        let y: Vec<f64> = (0..200)
            .map(|i| {
                let x = i as f64;
                0.05 * x + (x * 12.9898).sin() * 2.0
            })
            .collect();
        let smoothed = savgol_smooth(&y, 21, 4).unwrap();

        let ramp = |i: usize| 0.05 * i as f64;
        let raw_sse: f64 = y
            .iter()
            .enumerate()
            .map(|(i, v)| (v - ramp(i)).powi(2))
            .sum();
        let smooth_sse: f64 = smoothed
            .iter()
            .enumerate()
            .map(|(i, v)| (v - ramp(i)).powi(2))
            .sum();
        assert!(smooth_sse < raw_sse * 0.5, "{smooth_sse} vs {raw_sse}");
    }

    #[test]
    fn gaussian_peak_survives_smoothing() {
        let y: Vec<f64> = (0..=200)
            .map(|i| {
                let x = i as f64 * 0.5;
                let u = (x - 50.0) / 5.0;
                100.0 * (-0.5 * u * u).exp()
            })
            .collect();
        let smoothed = savgol_smooth(&y, 21, 4).unwrap();
        // The peak top flattens only slightly at this window/width ratio.
        assert!((smoothed[100] - 100.0).abs() < 1.0);
    }
}
