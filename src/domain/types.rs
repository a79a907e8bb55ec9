//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during fitting and interactive editing
//! - exported to CSV/JSON
//! - reloaded later for comparisons

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::curves::CompositeCurve;
use crate::error::AppError;

/// A loaded 1-D intensity profile (e.g., a gel-scan trace) and its single
/// active fit.
///
/// `x` is assumed ascending with uniform spacing for the estimator; `y`
/// has the same length. The fit starts unset and is seeded by the session
/// when the trace is activated; afterwards it is only replaced wholesale
/// (optimize/estimate/undo/redo) or mutated through the curve contract.
#[derive(Debug, Clone)]
pub struct Trace {
    pub path: Option<PathBuf>,
    /// Display name; for file-backed traces, the file stem.
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub fit: Option<CompositeCurve>,
}

impl Trace {
    /// Build a trace from raw arrays, validating the dataset-source
    /// contract: equal, non-zero lengths and finite values.
    pub fn from_xy(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self, AppError> {
        if x.is_empty() {
            return Err(AppError::new(3, "Trace has no data points."));
        }
        if x.len() != y.len() {
            return Err(AppError::new(
                3,
                format!("Trace column lengths differ: {} x vs {} y.", x.len(), y.len()),
            ));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::new(3, "Trace contains non-finite values."));
        }
        Ok(Self {
            path: None,
            name: name.into(),
            x,
            y,
            fit: None,
        })
    }

    /// Display name for a file-backed trace: the stem of its file name.
    pub fn name_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn stats(&self) -> TraceStats {
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &v in &self.y {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
        TraceStats {
            n_points: self.x.len(),
            x_min: self.x[0],
            x_max: self.x[self.x.len() - 1],
            y_min,
            y_max,
        }
    }
}

/// Summary stats about the points in a trace.
#[derive(Debug, Clone)]
pub struct TraceStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// One parameter-table row for a non-baseline curve.
///
/// `peak` is 1-based and assigned by ascending center after sorting, so
/// numbering is deterministic across renders and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakRow {
    pub peak: usize,
    pub y0: f64,
    pub area: f64,
    pub center: f64,
    pub amplitude: f64,
    pub width: f64,
}

/// A saved curve file (JSON): the portable representation of a fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    /// Generation timestamp (RFC 3339).
    pub generated: String,
    pub trace: String,
    pub baseline_y0: f64,
    pub peaks: Vec<PeakRow>,
    /// The composite evaluated over the trace's x grid, for quick plotting.
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A full `fit` run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Directory receiving the appended `export.csv` / `areas.csv`.
    pub export_dir: Option<PathBuf>,
    /// Optional curve JSON output path.
    pub export_curve: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_xy_rejects_bad_shapes() {
        assert!(Trace::from_xy("t", vec![], vec![]).is_err());
        assert!(Trace::from_xy("t", vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(Trace::from_xy("t", vec![1.0, f64::NAN], vec![1.0, 2.0]).is_err());
        assert!(Trace::from_xy("t", vec![1.0, 2.0], vec![3.0, 4.0]).is_ok());
    }

    #[test]
    fn stats_cover_the_ranges() {
        let trace = Trace::from_xy("t", vec![0.0, 1.0, 2.0], vec![5.0, -1.0, 3.0]).unwrap();
        let stats = trace.stats();
        assert_eq!(stats.n_points, 3);
        assert_eq!(stats.x_min, 0.0);
        assert_eq!(stats.x_max, 2.0);
        assert_eq!(stats.y_min, -1.0);
        assert_eq!(stats.y_max, 5.0);
    }

    #[test]
    fn name_from_path_strips_extension() {
        assert_eq!(Trace::name_from_path(Path::new("/data/lane_3.csv")), "lane_3");
    }
}
