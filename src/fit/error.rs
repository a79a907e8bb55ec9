//! Fitting-engine error taxonomy.
//!
//! Callers must distinguish three outcomes:
//! - `NoConvergence`: the optimizer gave up; recoverable, the previous fit
//!   stays in place and the user gets a "no fit found" status
//! - `TooFewSamples`: an estimation precondition failed; recoverable, no
//!   curve is produced
//! - `Numeric`: a programming/data error (non-finite inputs, unsolvable
//!   window regression); surfaced and then propagated, never swallowed

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// The optimizer exhausted its iteration limit without converging.
    NoConvergence { iterations: usize },
    /// The series is shorter than the smoothing window.
    TooFewSamples { required: usize, actual: usize },
    /// Non-finite data or an internal numeric failure.
    Numeric(String),
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::NoConvergence { iterations } => {
                write!(f, "Optimizer did not converge within {iterations} iterations.")
            }
            FitError::TooFewSamples { required, actual } => {
                write!(f, "Need at least {required} samples to estimate a fit, got {actual}.")
            }
            FitError::Numeric(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for FitError {}
