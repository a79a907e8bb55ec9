//! Write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fit:
//! - baseline offset + per-peak parameters (table rows)
//! - the composite evaluated over the trace's x grid for quick plotting
//! - trace name and a generation timestamp
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::curves::CompositeCurve;
use crate::domain::{CurveFile, CurveGrid, Trace};
use crate::error::AppError;
use crate::report::peak_rows;

/// Write a curve JSON file for the trace's current fit.
pub fn write_curve_json(path: &Path, trace: &Trace, fit: &CompositeCurve) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display()))
    })?;

    let peaks = peak_rows(fit);
    let baseline_y0 = fit
        .curves()
        .iter()
        .find(|c| c.is_baseline())
        .map(|c| c.params()[0])
        .unwrap_or(0.0);
    let grid_y: Vec<f64> = trace.x.iter().map(|&x| fit.evaluate(x)).collect();

    let curve = CurveFile {
        tool: "gq".to_string(),
        generated: Local::now().to_rfc3339(),
        trace: trace.name.clone(),
        baseline_y0,
        peaks,
        grid: CurveGrid {
            x: trace.x.clone(),
            y: grid_y,
        },
    };

    serde_json::to_writer_pretty(file, &curve).map_err(|e| {
        AppError::new(2, format!("Failed to write curve JSON '{}': {e}", path.display()))
    })?;
    Ok(())
}
