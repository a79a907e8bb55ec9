//! Shared "fit pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> session activation -> estimate + refine -> peak table
//!
//! The CLI can then focus on presentation (printing and export paths), and
//! tests can drive the same pipeline from in-memory traces.

use crate::domain::{FitConfig, PeakRow, Trace};
use crate::error::AppError;
use crate::session::Session;

/// All computed outputs of a single `gq fit` run.
pub struct RunOutput {
    pub session: Session,
    /// User-facing fit outcome line ("Fit found." or why not).
    pub status: String,
    /// Peak table rows, sorted by ascending center.
    pub rows: Vec<PeakRow>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Load the trace CSV.
    let trace = crate::io::read_trace_csv(&config.input)?;

    run_fit_with_trace(trace)
}

/// Execute the fitting pipeline with an already-loaded trace.
///
/// This is useful for tests and future front-ends where the data is already
/// in memory.
pub fn run_fit_with_trace(trace: Trace) -> Result<RunOutput, AppError> {
    // 2) Activate a session (seeds the baseline composite + history).
    let mut session = Session::new(trace);

    // 3) Estimate a fresh fit and chain the refinement pass.
    let status = session.estimate()?;

    // 4) Build the parameter table from the active fit.
    let rows = crate::report::peak_rows(session.fit());

    Ok(RunOutput {
        session,
        status,
        rows,
    })
}
