//! Command-line parsing for the trace decomposition tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gq",
    version,
    about = "Decompose a 1-D intensity trace into a baseline plus Gaussian peaks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a trace CSV (estimate then refine), print the peak table, and
    /// optionally plot/export.
    Fit(FitArgs),
    /// Generate a synthetic demo trace CSV.
    Sample(SampleArgs),
}

/// Options for fitting a trace.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input trace CSV (two columns: x, y; header row optional).
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Render an ASCII plot of the trace and fit.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Append the peak table and area summary CSVs to this directory.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Export the fitted curve (params + evaluated grid) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,
}

/// Options for generating a synthetic trace.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long)]
    pub out: PathBuf,

    /// Random seed for noise generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of sample points.
    #[arg(long, default_value_t = 201)]
    pub points: usize,

    /// X spacing between samples.
    #[arg(long, default_value_t = 0.5)]
    pub step: f64,

    /// Standard deviation of additive Gaussian noise.
    #[arg(long, default_value_t = 1.5)]
    pub noise: f64,
}
