//! Bounded undo/redo history of fit states.
//!
//! A fixed-capacity buffer of composite-curve snapshots, newest first, with
//! a separate read offset tracking how far undo has walked back. Pushing
//! always resets the offset to zero and discards everything ahead of the
//! cursor (the redo branch); the oldest entries fall off the tail when the
//! capacity is reached. Every snapshot handed out or stored is an
//! independent clone, so live edits never rewrite stored history.

use std::collections::VecDeque;

use crate::curves::CompositeCurve;

/// Maximum number of stored snapshots.
pub const HISTORY_CAPACITY: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct FitHistory {
    /// Snapshots ordered newest (front) to oldest (back).
    entries: VecDeque<CompositeCurve>,
    /// How far back from the head the cursor currently sits.
    read_offset: usize,
}

impl FitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot the cursor currently points at.
    pub fn current(&self) -> Option<&CompositeCurve> {
        self.entries.get(self.read_offset)
    }

    pub fn can_undo(&self) -> bool {
        self.read_offset + 1 < self.entries.len()
    }

    pub fn can_redo(&self) -> bool {
        self.read_offset > 0
    }

    /// Record a snapshot as the new head.
    ///
    /// Any entries ahead of the cursor (the redo branch) are discarded
    /// first, and the tail is trimmed to capacity.
    pub fn push(&mut self, snapshot: &CompositeCurve) {
        for _ in 0..self.read_offset {
            self.entries.pop_front();
        }
        self.read_offset = 0;

        self.entries.push_front(snapshot.clone());
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Step the cursor one snapshot back and return a clone of it.
    ///
    /// `None` at the boundary; no state changes in that case.
    pub fn undo(&mut self) -> Option<CompositeCurve> {
        if !self.can_undo() {
            return None;
        }
        self.read_offset += 1;
        self.entries.get(self.read_offset).cloned()
    }

    /// Step the cursor one snapshot forward and return a clone of it.
    ///
    /// `None` at the head; no state changes in that case.
    pub fn redo(&mut self) -> Option<CompositeCurve> {
        if !self.can_redo() {
            return None;
        }
        self.read_offset -= 1;
        self.entries.get(self.read_offset).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CompositeCurve;

    fn snapshot(y0: f64) -> CompositeCurve {
        CompositeCurve::with_baseline(y0)
    }

    fn baseline_of(curve: &CompositeCurve) -> f64 {
        curve.params()[0]
    }

    #[test]
    fn undo_walks_back_to_first_push_and_redo_returns() {
        let mut history = FitHistory::new();
        for k in 1..=5 {
            history.push(&snapshot(k as f64));
        }

        for expected in (1..=4).rev() {
            let restored = history.undo().unwrap();
            assert_eq!(baseline_of(&restored), expected as f64);
        }
        assert!(history.undo().is_none());

        for expected in 2..=5 {
            let restored = history.redo().unwrap();
            assert_eq!(baseline_of(&restored), expected as f64);
        }
        assert!(history.redo().is_none());
    }

    #[test]
    fn boundary_undo_redo_are_no_ops() {
        let mut history = FitHistory::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        history.push(&snapshot(1.0));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut history = FitHistory::new();
        for k in 1..=4 {
            history.push(&snapshot(k as f64));
        }
        history.undo();
        history.undo();
        // Cursor at snapshot 2; snapshots 3 and 4 are the redo branch.
        history.push(&snapshot(9.0));

        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(baseline_of(history.current().unwrap()), 9.0);
        assert_eq!(baseline_of(&history.undo().unwrap()), 2.0);
    }

    #[test]
    fn capacity_drops_oldest_entries() {
        let mut history = FitHistory::new();
        for k in 1..=20 {
            history.push(&snapshot(k as f64));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        // Walk all the way back: the oldest surviving snapshot is number 6.
        let mut last = None;
        while let Some(restored) = history.undo() {
            last = Some(baseline_of(&restored));
        }
        assert_eq!(last, Some(6.0));
    }

    #[test]
    fn restored_snapshots_are_independent_clones() {
        let mut history = FitHistory::new();
        history.push(&snapshot(1.0));
        history.push(&snapshot(2.0));

        let mut restored = history.undo().unwrap();
        restored.set_params(&[42.0]);

        // The stored entry is untouched.
        assert_eq!(baseline_of(history.current().unwrap()), 1.0);
        let forward = history.redo().unwrap();
        assert_eq!(baseline_of(&forward), 2.0);
    }
}
