//! Per-dataset session state and the interactive edit reducers.
//!
//! A `Session` owns the active trace, its composite curve, the undo/redo
//! history, and the editing modes (handle selection, width lock). Every
//! user intent (select, drag, shift-drag, add/delete peak, optimize,
//! estimate, undo, redo) maps 1:1 to a method here, so the UI layer
//! stays a thin event translator.
//!
//! Edit reducers are total functions: at a boundary (nothing selected,
//! nothing to undo) they change nothing and report a neutral status.
//! Fitting methods return `Err` only for unexpected numeric failures,
//! which callers surface and re-raise; recoverable outcomes (no
//! convergence, too few samples) come back as `Ok` status messages with
//! the previous fit left in place.

use crate::curves::{CompositeCurve, Curve};
use crate::domain::Trace;
use crate::error::AppError;
use crate::fit::{self, default_peak_width, FitError};
use crate::history::FitHistory;

/// Baseline offset a freshly activated dataset starts from.
const DEFAULT_BASELINE: f64 = 1.0;

pub struct Session {
    trace: Trace,
    fit: CompositeCurve,
    history: FitHistory,
    /// Width-lock mode: `Some(w)` forces every peak width to `w`.
    width_lock: Option<f64>,
    /// Index of the curve whose handle is selected, if any.
    selected: Option<usize>,
}

impl Session {
    /// Activate a trace: seed its composite with the default baseline if it
    /// has none yet, and start the history from that state.
    pub fn new(mut trace: Trace) -> Self {
        let fit = trace
            .fit
            .take()
            .unwrap_or_else(|| CompositeCurve::with_baseline(DEFAULT_BASELINE));
        let mut history = FitHistory::new();
        history.push(&fit);
        Self {
            trace,
            fit,
            history,
            width_lock: None,
            selected: None,
        }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn fit(&self) -> &CompositeCurve {
        &self.fit
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn width_lock(&self) -> Option<f64> {
        self.width_lock
    }

    /// Hand the trace back with its current fit, e.g. when switching
    /// datasets.
    pub fn into_trace(mut self) -> Trace {
        self.trace.fit = Some(self.fit);
        self.trace
    }

    /// Select the nearest handle within `tolerance` of `(x, y)` (data
    /// units), or deselect if none is close enough.
    ///
    /// Peak handles sit at `(center, peak value)`; the baseline handle sits
    /// at the x-midpoint of the trace.
    pub fn select_handle(&mut self, x: f64, y: f64, tolerance: f64) -> Option<usize> {
        let mid_x = (self.trace.x[0] + self.trace.x[self.trace.x.len() - 1]) / 2.0;

        let mut best: Option<(usize, f64)> = None;
        for (index, curve) in self.fit.curves().iter().enumerate() {
            let hx = if curve.is_baseline() { mid_x } else { curve.sort_key() };
            let hy = curve.evaluate(hx);
            let distance = (x - hx).hypot(y - hy);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        self.selected = match best {
            Some((index, distance)) if distance <= tolerance => Some(index),
            _ => None,
        };
        self.selected
    }

    /// Plain drag of the selected handle: a peak follows the cursor in
    /// center and amplitude; the baseline follows in offset only.
    pub fn drag(&mut self, position: (f64, f64)) {
        let Some(index) = self.selected else { return };
        let (x, y) = position;
        match self.fit.curve_mut(index) {
            Curve::Gaussian(peak) => {
                peak.set_center(x);
                peak.set_amplitude(y);
            }
            Curve::Constant(baseline) => baseline.y = y,
        }
    }

    /// Shift-drag of the selected handle: a peak follows the cursor in
    /// amplitude while its width becomes the horizontal distance from the
    /// initial click. With widths locked, the new width is propagated to
    /// every peak and becomes the lock value.
    pub fn shift_drag(&mut self, position: (f64, f64), click_origin: (f64, f64)) {
        let Some(index) = self.selected else { return };
        let (x, y) = position;

        let mut updated_lock = None;
        match self.fit.curve_mut(index) {
            Curve::Gaussian(peak) => {
                peak.set_amplitude(y);
                peak.set_width(click_origin.0 - x);
                if self.width_lock.is_some() {
                    updated_lock = Some(peak.width());
                }
            }
            Curve::Constant(baseline) => baseline.y = y,
        }

        if let Some(width) = updated_lock {
            self.width_lock = Some(width);
            self.apply_width_lock();
        }
    }

    /// Toggle the width lock.
    ///
    /// Unlocked -> locked to the first peak's current width (propagated to
    /// all peaks); locked -> unlocked without touching current widths. A
    /// no-op while the composite has no peaks.
    pub fn toggle_width_lock(&mut self) -> String {
        if self.fit.peak_count() == 0 {
            return "No peaks to lock.".to_string();
        }

        if self.width_lock.take().is_some() {
            return "Gaussian widths unlocked.".to_string();
        }

        let first_width = self
            .fit
            .curves()
            .iter()
            .find_map(|curve| match curve {
                Curve::Gaussian(peak) => Some(peak.width()),
                Curve::Constant(_) => None,
            })
            .unwrap_or_else(|| default_peak_width(&self.trace.x));
        self.width_lock = Some(first_width);
        self.apply_width_lock();
        format!("Gaussian widths fixed to {first_width:.2}")
    }

    fn apply_width_lock(&mut self) {
        let Some(width) = self.width_lock else { return };
        for index in 0..self.fit.len() {
            if let Curve::Gaussian(peak) = self.fit.curve_mut(index) {
                peak.set_width(width);
            }
        }
    }

    /// Add a peak at `(x, y)` with the locked width, or the default width
    /// (x-span / 20) when unlocked.
    pub fn add_peak(&mut self, x: f64, y: f64) -> String {
        let width = self
            .width_lock
            .unwrap_or_else(|| default_peak_width(&self.trace.x));
        self.fit.push(Curve::gaussian(x, y, width));
        self.record();
        format!("Gaussian added at ({x:.2}, {y:.2}).")
    }

    /// Delete the selected peak. The baseline is never deleted; with it (or
    /// nothing) selected this is a no-op.
    pub fn delete_selected(&mut self) -> Option<String> {
        let index = self.selected?;
        if self.fit.curves()[index].is_baseline() {
            return None;
        }
        self.fit.remove(index);
        self.selected = None;
        self.record();
        Some("Gaussian deleted.".to_string())
    }

    /// Record the current state after a completed manual edit (drag
    /// release). Deduplicated against the history head so untouched
    /// releases stay silent.
    pub fn commit_edit(&mut self) -> Option<String> {
        self.record().then(|| "Gaussian moved manually.".to_string())
    }

    /// Refine the current fit against the trace.
    ///
    /// Convergence failure is recoverable: the previous fit stays active
    /// and the status says so. Unexpected numeric errors propagate.
    pub fn optimize(&mut self) -> Result<String, AppError> {
        match fit::optimize_fit(&self.trace.x, &self.trace.y, &self.fit) {
            Ok(refined) => {
                self.fit = refined;
                self.record();
                Ok("Fit found.".to_string())
            }
            Err(FitError::NoConvergence { .. }) => Ok("An optimal fit was not found!".to_string()),
            Err(err) => Err(AppError::new(
                4,
                format!("An error occurred during fitting: {err}"),
            )),
        }
    }

    /// Estimate a fresh fit from the raw data, then chain a refinement
    /// pass. A failed estimation leaves the current fit untouched; a
    /// failed refinement leaves the unrefined estimate active.
    pub fn estimate(&mut self) -> Result<String, AppError> {
        match fit::estimate_fit(&self.trace.x, &self.trace.y) {
            Ok(estimate) => {
                self.fit = estimate;
                self.selected = None;
                self.optimize()
            }
            Err(FitError::TooFewSamples { .. }) => {
                Ok("An estimate could not be calculated!".to_string())
            }
            Err(err) => Err(AppError::new(
                4,
                format!("An error occurred during estimation: {err}"),
            )),
        }
    }

    /// Step back to the previous fit state. A no-op at the boundary.
    pub fn undo(&mut self) -> String {
        match self.history.undo() {
            Some(snapshot) => {
                self.fit = snapshot;
                self.selected = None;
                "Undid last change.".to_string()
            }
            None => "Nothing to undo.".to_string(),
        }
    }

    /// Step forward again. A no-op at the head.
    pub fn redo(&mut self) -> String {
        match self.history.redo() {
            Some(snapshot) => {
                self.fit = snapshot;
                self.selected = None;
                "Redid last change.".to_string()
            }
            None => "Nothing to redo.".to_string(),
        }
    }

    /// Discard the fit and start over from the default baseline, with a
    /// fresh history.
    pub fn reset_fit(&mut self) -> String {
        self.fit = CompositeCurve::with_baseline(DEFAULT_BASELINE);
        self.history = FitHistory::new();
        self.history.push(&self.fit);
        self.selected = None;
        "Fit reset.".to_string()
    }

    /// Push a snapshot if the fit differs from the history head. Returns
    /// whether anything was recorded.
    fn record(&mut self) -> bool {
        let changed = self
            .history
            .current()
            .is_none_or(|head| head.params() != self.fit.params());
        if changed {
            self.history.push(&self.fit);
        }
        changed
    }
}
