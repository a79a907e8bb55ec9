//! Automatic peak estimation from raw trace data.
//!
//! The estimator proposes a fresh composite curve with no seed required:
//! smooth, differentiate, and turn qualifying first-derivative zero
//! crossings into Gaussians. The result is a starting point for
//! `optimize_fit`, not a final fit, and the screening thresholds are
//! deliberately conservative so noise is not over-fit as peaks.
//!
//! The x spacing is assumed uniform (the derivative step is taken from
//! `x[1] - x[0]`); non-uniform grids are out of contract.

use crate::curves::{CompositeCurve, Curve};
use crate::fit::FitError;
use crate::math::{central_derivative, savgol_smooth, zero_crossings};

/// Smoothing window length; series shorter than this cannot be estimated.
pub const SAVGOL_WINDOW: usize = 21;
/// Smoothing polynomial order.
pub const SAVGOL_ORDER: usize = 4;

/// Width cap for accepted peaks, in units of the default peak width
/// (x-span / 20). Wider implied widths are curvature artifacts, not peaks.
const WIDTH_CAP_FACTOR: f64 = 3.0;
/// Minimum peak height above baseline, as a fraction of the smoothed
/// series' full vertical range.
const MIN_HEIGHT_FRACTION: f64 = 0.5;

/// Default width for a newly placed peak: the x-span divided by 20.
pub fn default_peak_width(x: &[f64]) -> f64 {
    match (x.first(), x.last()) {
        (Some(first), Some(last)) => (last - first) / 20.0,
        _ => 1.0,
    }
}

/// Propose a composite curve (baseline + 0..k Gaussians) from raw data.
///
/// Steps:
/// 1. Savitzky-Golay smooth (window 21, order 4); shorter input is a
///    `TooFewSamples` error, never a silent truncation.
/// 2. First and second central-difference derivatives, step `x[1] - x[0]`.
/// 3. Baseline = first smoothed sample.
/// 4. First-derivative zero crossings are peak candidates.
/// 5. Accept a candidate at `i` iff the second derivative is negative
///    there, the implied width `sqrt(-y[i] / ddy[i])` is under the cap,
///    and the height above baseline exceeds half the vertical range.
///
/// Callers are expected to chain `optimize_fit` on the result.
pub fn estimate_fit(x: &[f64], y: &[f64]) -> Result<CompositeCurve, FitError> {
    if x.len() != y.len() {
        return Err(FitError::Numeric(format!(
            "x/y length mismatch: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < SAVGOL_WINDOW {
        return Err(FitError::TooFewSamples {
            required: SAVGOL_WINDOW,
            actual: x.len(),
        });
    }

    let step = x[1] - x[0];
    if !step.is_finite() || step <= 0.0 {
        return Err(FitError::Numeric(format!("Non-positive x step: {step}")));
    }

    let smoothed = savgol_smooth(y, SAVGOL_WINDOW, SAVGOL_ORDER)
        .ok_or_else(|| FitError::Numeric("Smoothing window regression failed.".to_string()))?;

    let dy = central_derivative(&smoothed, step);
    let ddy = central_derivative(&dy, step);

    let baseline = smoothed[0];
    let mut estimate = CompositeCurve::with_baseline(baseline);

    let y_max = smoothed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let acceptable_height = MIN_HEIGHT_FRACTION * (y_max - baseline);
    let width_cap = WIDTH_CAP_FACTOR * default_peak_width(x);

    for i in zero_crossings(&dy) {
        // Concave at the crossing, i.e. a local maximum.
        if ddy[i] >= 0.0 {
            continue;
        }
        // NaN for negative smoothed values; the comparison below rejects it.
        let width = (-smoothed[i] / ddy[i]).sqrt();
        let height = smoothed[i] - baseline;
        if width < width_cap && height > acceptable_height {
            estimate.push(Curve::gaussian(x[i], height, width));
        }
    }

    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian_trace(
        n: usize,
        step: f64,
        baseline: f64,
        peaks: &[(f64, f64, f64)],
    ) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&xi| {
                baseline
                    + peaks
                        .iter()
                        .map(|&(c, a, w)| {
                            let u = (xi - c) / w;
                            a * (-0.5 * u * u).exp()
                        })
                        .sum::<f64>()
            })
            .collect();
        (x, y)
    }

    #[test]
    fn clean_single_peak_is_recovered() {
        // x = 0..100 step 0.5, one peak at 50 with amplitude 100, width 5.
        let (x, y) = gaussian_trace(201, 0.5, 0.0, &[(50.0, 100.0, 5.0)]);
        let estimate = estimate_fit(&x, &y).unwrap();

        assert_eq!(estimate.peak_count(), 1);
        let Curve::Gaussian(peak) = &estimate.curves()[1] else {
            panic!("expected a Gaussian at index 1");
        };
        assert!((peak.center() - 50.0).abs() <= 1.0, "center {}", peak.center());
        assert!((peak.width() - 5.0).abs() <= 1.0, "width {}", peak.width());
        assert!((peak.amplitude() - 100.0).abs() <= 5.0, "amp {}", peak.amplitude());
    }

    #[test]
    fn baseline_is_seeded_from_first_sample() {
        let (x, y) = gaussian_trace(201, 0.5, 7.5, &[(50.0, 100.0, 4.0)]);
        let estimate = estimate_fit(&x, &y).unwrap();
        assert!(estimate.curves()[0].is_baseline());
        assert!((estimate.curves()[0].evaluate(0.0) - 7.5).abs() < 0.5);
    }

    #[test]
    fn two_separated_peaks_are_both_found() {
        let (x, y) = gaussian_trace(201, 0.5, 5.0, &[(30.0, 100.0, 2.0), (70.0, 60.0, 2.5)]);
        let mut estimate = estimate_fit(&x, &y).unwrap();
        assert_eq!(estimate.peak_count(), 2);

        estimate.sort();
        let centers: Vec<f64> = estimate.curves()[1..].iter().map(|c| c.sort_key()).collect();
        assert!((centers[0] - 30.0).abs() <= 1.0);
        assert!((centers[1] - 70.0).abs() <= 1.0);
    }

    #[test]
    fn minor_shoulder_peaks_are_screened_out() {
        // The low second peak is under half the vertical range.
        let (x, y) = gaussian_trace(201, 0.5, 0.0, &[(30.0, 100.0, 2.0), (70.0, 20.0, 2.0)]);
        let estimate = estimate_fit(&x, &y).unwrap();
        assert_eq!(estimate.peak_count(), 1);
    }

    #[test]
    fn flat_trace_yields_baseline_only() {
        let (x, y) = gaussian_trace(101, 1.0, 3.0, &[]);
        let estimate = estimate_fit(&x, &y).unwrap();
        assert_eq!(estimate.len(), 1);
        assert!(estimate.curves()[0].is_baseline());
    }

    #[test]
    fn short_series_is_a_detectable_precondition() {
        let (x, y) = gaussian_trace(20, 1.0, 0.0, &[(10.0, 5.0, 2.0)]);
        match estimate_fit(&x, &y) {
            Err(FitError::TooFewSamples { required, actual }) => {
                assert_eq!(required, SAVGOL_WINDOW);
                assert_eq!(actual, 20);
            }
            other => panic!("expected TooFewSamples, got {other:?}"),
        }
    }
}
