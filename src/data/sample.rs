//! Synthetic trace generation.
//!
//! Deterministic (seeded) gel-scan-like traces: a flat baseline, a few
//! well-separated Gaussian bands, and optional Gaussian noise. Used by the
//! `sample` subcommand to produce demo inputs and by tests that need
//! realistic data without fixture files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Trace;
use crate::error::AppError;

/// Configuration for one synthetic trace.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    pub n_points: usize,
    pub x_step: f64,
    pub baseline: f64,
    /// Standard deviation of additive Gaussian noise; 0 disables noise.
    pub noise_sigma: f64,
    /// Bands as `(center, amplitude, width)` triples.
    pub peaks: Vec<(f64, f64, f64)>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_points: 201,
            x_step: 0.5,
            baseline: 5.0,
            noise_sigma: 0.0,
            peaks: vec![(30.0, 100.0, 2.0), (70.0, 60.0, 2.5)],
        }
    }
}

/// Generate a synthetic trace from the config.
pub fn generate_trace(config: &SampleConfig) -> Result<Trace, AppError> {
    if config.n_points == 0 {
        return Err(AppError::new(2, "Sample point count must be > 0."));
    }
    if !(config.x_step.is_finite() && config.x_step > 0.0) {
        return Err(AppError::new(2, "Sample x step must be positive."));
    }
    if config.noise_sigma < 0.0 {
        return Err(AppError::new(2, "Noise sigma must be >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let x: Vec<f64> = (0..config.n_points).map(|i| i as f64 * config.x_step).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| {
            let bands: f64 = config
                .peaks
                .iter()
                .map(|&(center, amplitude, width)| {
                    let u = (xi - center) / width;
                    amplitude * (-0.5 * u * u).exp()
                })
                .sum();
            let noise = if config.noise_sigma > 0.0 {
                normal.sample(&mut rng) * config.noise_sigma
            } else {
                0.0
            };
            config.baseline + bands + noise
        })
        .collect();

    Trace::from_xy(format!("sample_seed{}", config.seed), x, y)
}

/// Write a trace as a two-column x,y CSV with an ImageJ-style header row.
pub fn write_trace_csv(path: &Path, trace: &Trace) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;

    writeln!(file, "Distance,Gray_Value")
        .map_err(|e| AppError::new(2, format!("Failed to write sample header: {e}")))?;
    for (xv, yv) in trace.x.iter().zip(&trace.y) {
        writeln!(file, "{xv},{yv}")
            .map_err(|e| AppError::new(2, format!("Failed to write sample row: {e}")))?;
    }
    Ok(())
}
