//! Reporting utilities: parameter-table rows and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the curve/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;

use crate::curves::{CompositeCurve, Curve};
use crate::domain::PeakRow;

/// Build the parameter table for a composite curve: one row per peak, in
/// ascending-center order, 1-based numbering, with the baseline offset
/// repeated on every row.
///
/// The composite is sorted internally, so the numbering is deterministic
/// regardless of insertion order.
pub fn peak_rows(fit: &CompositeCurve) -> Vec<PeakRow> {
    let mut sorted = fit.clone();
    sorted.sort();

    let mut y0 = 0.0;
    let mut rows = Vec::new();
    for curve in sorted.curves() {
        match curve {
            Curve::Constant(baseline) => y0 = baseline.y,
            Curve::Gaussian(peak) => rows.push(PeakRow {
                peak: rows.len() + 1,
                y0,
                area: curve.area(),
                center: peak.center(),
                amplitude: peak.amplitude(),
                width: peak.width(),
            }),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_numbered_by_ascending_center() {
        let mut fit = CompositeCurve::new();
        fit.push(Curve::gaussian(70.0, 60.0, 2.5));
        fit.push(Curve::constant(5.0));
        fit.push(Curve::gaussian(30.0, 100.0, 2.0));

        let rows = peak_rows(&fit);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].peak, 1);
        assert_eq!(rows[0].center, 30.0);
        assert_eq!(rows[0].y0, 5.0);
        assert_eq!(rows[1].peak, 2);
        assert_eq!(rows[1].center, 70.0);
        assert_eq!(rows[1].y0, 5.0);

        // The input composite is not reordered by reporting.
        assert!(fit.curves()[1].is_baseline());
    }

    #[test]
    fn baseline_only_fit_has_no_rows() {
        let fit = CompositeCurve::with_baseline(2.0);
        assert!(peak_rows(&fit).is_empty());
    }

    #[test]
    fn areas_use_the_closed_form() {
        let mut fit = CompositeCurve::with_baseline(0.0);
        fit.push(Curve::gaussian(10.0, 4.0, 2.0));
        let rows = peak_rows(&fit);
        let expected = 2.0 * 4.0 * 2.0 * (std::f64::consts::PI / 2.0).sqrt();
        assert!((rows[0].area - expected).abs() < 1e-12);
    }
}
