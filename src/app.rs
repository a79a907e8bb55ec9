//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates trace data
//! - runs estimation + refinement through a session
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs, SampleArgs};
use crate::data::{generate_trace, write_trace_csv, SampleConfig};
use crate::domain::FitConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gq` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(run.session.trace(), &run.status)
    );
    println!("{}", crate::report::format_peak_table(&run.rows));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            run.session.trace(),
            Some(run.session.fit()),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(dir) = &config.export_dir {
        let name = &run.session.trace().name;
        crate::io::append_peak_table(dir, name, &run.rows)?;
        crate::io::append_area_summary(dir, name, &run.rows)?;
        println!("Appended to 'export.csv' and 'areas.csv' in '{}'.", dir.display());
    }
    if let Some(path) = &config.export_curve {
        crate::io::write_curve_json(path, run.session.trace(), run.session.fit())?;
        println!("Wrote curve JSON to '{}'.", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        seed: args.seed,
        n_points: args.points,
        x_step: args.step,
        noise_sigma: args.noise,
        ..SampleConfig::default()
    };
    let trace = generate_trace(&config)?;
    write_trace_csv(&args.out, &trace)?;
    println!("Wrote {} points to '{}'.", trace.x.len(), args.out.display());
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input: args.input.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_dir: args.export_dir.clone(),
        export_curve: args.export_curve.clone(),
    }
}
