//! Composite curve: an ordered collection of curves fit as one unit.
//!
//! The composite's flat parameter vector is the concatenation of each
//! member's parameter tuple, in member order. Slice boundaries are recovered
//! from an explicit offset table that is rebuilt on every membership change
//! (push/remove/sort), so `params`/`set_params`/`evaluate_with` never depend
//! on call-order discipline between the three.

use crate::curves::Curve;

/// A baseline plus zero or more peaks, evaluated as the sum of its members.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCurve {
    curves: Vec<Curve>,
    /// Start index of each member's slice in the flat parameter vector.
    offsets: Vec<usize>,
    total_params: usize,
}

impl CompositeCurve {
    pub fn new() -> Self {
        Self {
            curves: Vec::new(),
            offsets: Vec::new(),
            total_params: 0,
        }
    }

    /// A composite seeded with its baseline, the state every dataset starts
    /// from.
    pub fn with_baseline(y0: f64) -> Self {
        let mut composite = Self::new();
        composite.push(Curve::constant(y0));
        composite
    }

    fn rebuild_offsets(&mut self) {
        self.offsets.clear();
        let mut offset = 0;
        for curve in &self.curves {
            self.offsets.push(offset);
            offset += curve.param_count();
        }
        self.total_params = offset;
    }

    pub fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
        self.rebuild_offsets();
    }

    /// Remove and return the member at `index`.
    ///
    /// Callers are responsible for never removing the baseline.
    pub fn remove(&mut self, index: usize) -> Curve {
        let curve = self.curves.remove(index);
        self.rebuild_offsets();
        curve
    }

    /// Stable sort by ascending center; the baseline sentinel guarantees it
    /// lands at index 0. Idempotent.
    pub fn sort(&mut self) {
        self.curves.sort_by(|a, b| {
            a.sort_key()
                .partial_cmp(&b.sort_key())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.rebuild_offsets();
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Mutable access to a member for in-place edits.
    ///
    /// The member's variant must not be replaced through this reference; the
    /// offset table assumes arities are fixed.
    pub fn curve_mut(&mut self, index: usize) -> &mut Curve {
        &mut self.curves[index]
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Number of peaks (non-baseline members).
    pub fn peak_count(&self) -> usize {
        self.curves.iter().filter(|c| !c.is_baseline()).count()
    }

    /// Total length of the flat parameter vector.
    pub fn param_count(&self) -> usize {
        self.total_params
    }

    /// The flat parameter vector: each member's tuple concatenated in member
    /// order.
    pub fn params(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(self.total_params);
        for curve in &self.curves {
            params.extend(curve.params());
        }
        params
    }

    /// Write a flat parameter vector back into the members.
    ///
    /// # Panics
    /// Debug-asserts that `params.len() == self.param_count()`; a mismatch is
    /// a caller bug, not a recoverable condition.
    pub fn set_params(&mut self, params: &[f64]) {
        debug_assert_eq!(params.len(), self.total_params);
        for (curve, &offset) in self.curves.iter_mut().zip(&self.offsets) {
            let count = curve.param_count();
            curve.set_params(&params[offset..offset + count]);
        }
    }

    /// Evaluate the composite at `x`: the sum of member evaluations.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.curves.iter().map(|c| c.evaluate(x)).sum()
    }

    /// Evaluate the composite at `x` from an override parameter vector,
    /// sliced per member by the offset table. Members are not mutated.
    pub fn evaluate_with(&self, x: f64, params: &[f64]) -> f64 {
        debug_assert_eq!(params.len(), self.total_params);
        self.curves
            .iter()
            .zip(&self.offsets)
            .map(|(curve, &offset)| {
                curve.evaluate_with(x, &params[offset..offset + curve.param_count()])
            })
            .sum()
    }

    /// Analytic partial derivatives of the composite value at `x` with
    /// respect to the full flat vector, written into `out`.
    ///
    /// Members are independent summands, so each writes only its own slice.
    pub fn partials(&self, x: f64, params: &[f64], out: &mut [f64]) {
        debug_assert_eq!(params.len(), self.total_params);
        debug_assert_eq!(out.len(), self.total_params);
        for (curve, &offset) in self.curves.iter().zip(&self.offsets) {
            let count = curve.param_count();
            curve.partials(
                x,
                &params[offset..offset + count],
                &mut out[offset..offset + count],
            );
        }
    }
}

impl Default for CompositeCurve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_peak_composite() -> CompositeCurve {
        let mut composite = CompositeCurve::with_baseline(2.0);
        composite.push(Curve::gaussian(70.0, 60.0, 4.0));
        composite.push(Curve::gaussian(30.0, 100.0, 2.0));
        composite
    }

    #[test]
    fn params_roundtrip_is_identity() {
        let mut composite = two_peak_composite();
        let params = composite.params();
        assert_eq!(params.len(), 7);

        let before: Vec<f64> = (0..=100).map(|i| composite.evaluate(i as f64)).collect();
        composite.set_params(&params);
        let after: Vec<f64> = (0..=100).map(|i| composite.evaluate(i as f64)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn evaluate_is_sum_of_members() {
        let composite = two_peak_composite();
        for &x in &[0.0, 15.0, 30.0, 50.0, 70.0, 100.0] {
            let sum: f64 = composite.curves().iter().map(|c| c.evaluate(x)).sum();
            assert!((composite.evaluate(x) - sum).abs() < 1e-12);
        }
    }

    #[test]
    fn evaluate_with_matches_stored_params() {
        let composite = two_peak_composite();
        let params = composite.params();
        for &x in &[0.0, 29.5, 30.0, 69.0, 100.0] {
            assert!((composite.evaluate_with(x, &params) - composite.evaluate(x)).abs() < 1e-12);
        }
    }

    #[test]
    fn override_slices_follow_member_order() {
        let composite = two_peak_composite();
        // Zero out the second member's amplitude (offset 4 + 1) and check
        // only that peak disappears.
        let mut params = composite.params();
        params[5] = 0.0;
        let y = composite.evaluate_with(70.0, &params);
        let baseline_plus_first_peak = 2.0 + composite.curves()[1].evaluate(70.0);
        assert!((y - baseline_plus_first_peak).abs() < 1e-9);
    }

    #[test]
    fn sort_is_idempotent_and_baseline_first() {
        let mut composite = two_peak_composite();
        composite.sort();
        assert!(composite.curves()[0].is_baseline());
        let centers: Vec<f64> = composite.curves().iter().map(|c| c.sort_key()).collect();
        assert_eq!(centers, vec![-1.0, 30.0, 70.0]);

        let once = composite.clone();
        composite.sort();
        assert_eq!(composite, once);
    }

    #[test]
    fn offsets_follow_membership_changes() {
        let mut composite = two_peak_composite();
        assert_eq!(composite.param_count(), 7);

        composite.sort();
        let params = composite.params();
        // After sorting, the near peak's center leads the peak block.
        assert_eq!(params[1], 30.0);

        composite.remove(1);
        assert_eq!(composite.param_count(), 4);
        assert_eq!(composite.params(), vec![2.0, 70.0, 60.0, 4.0]);
    }

    #[test]
    fn peak_count_excludes_baseline() {
        let composite = two_peak_composite();
        assert_eq!(composite.len(), 3);
        assert_eq!(composite.peak_count(), 2);
    }
}
