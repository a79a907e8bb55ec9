//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed trace: `o`
//! - fitted composite: `-` line
//! - fitted peak centers: `+` markers

use crate::curves::{CompositeCurve, Curve};
use crate::domain::Trace;

/// Render the observed trace with the fitted composite overlaid.
pub fn render_ascii_plot(
    trace: &Trace,
    fit: Option<&CompositeCurve>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let stats = trace.stats();
    let (x_min, x_max) = if stats.x_max > stats.x_min {
        (stats.x_min, stats.x_max)
    } else {
        (stats.x_min, stats.x_min + 1.0)
    };

    let curve_points: Option<Vec<(f64, f64)>> = fit.map(|fit| {
        (0..width.max(2))
            .map(|i| {
                let u = i as f64 / (width.max(2) as f64 - 1.0);
                let x = x_min + u * (x_max - x_min);
                (x, fit.evaluate(x))
            })
            .collect()
    });

    let (y_min, y_max) = y_range(trace, curve_points.as_deref()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the composite first so observed points can overlay it.
    if let Some(curve) = &curve_points {
        draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);
    }

    for (&xv, &yv) in trace.x.iter().zip(&trace.y) {
        let col = map_x(xv, x_min, x_max, width);
        let row = map_y(yv, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    // Mark fitted peak centers on top.
    if let Some(fit) = fit {
        for curve in fit.curves() {
            if let Curve::Gaussian(peak) = curve {
                let col = map_x(peak.center(), x_min, x_max, width);
                let row = map_y(fit.evaluate(peak.center()), y_min, y_max, height);
                grid[row][col] = '+';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.2}, {x_max:.2}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn y_range(trace: &Trace, curve: Option<&[(f64, f64)]>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &v in &trace.y {
        min_y = min_y.min(v);
        max_y = max_y.max(v);
    }
    if let Some(curve) = curve {
        for &(_, v) in curve {
            min_y = min_y.min(v);
            max_y = max_y.max(v);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y = max maps to the top row.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are painted so
/// overlays keep their glyphs.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Curve;
    use crate::domain::Trace;

    fn small_trace() -> Trace {
        let x: Vec<f64> = (0..=40).map(|i| i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&xi| {
                let u = (xi - 20.0) / 3.0;
                2.0 + 10.0 * (-0.5 * u * u).exp()
            })
            .collect();
        Trace::from_xy("plot", x, y).unwrap()
    }

    #[test]
    fn plot_has_requested_dimensions_and_header() {
        let trace = small_trace();
        let out = render_ascii_plot(&trace, None, 60, 15);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("Plot:"));
        for line in &lines[1..] {
            assert!(line.len() <= 60);
        }
    }

    #[test]
    fn observed_points_and_overlay_are_drawn() {
        let trace = small_trace();
        let mut fit = CompositeCurve::with_baseline(2.0);
        fit.push(Curve::gaussian(20.0, 10.0, 3.0));

        let out = render_ascii_plot(&trace, Some(&fit), 60, 15);
        assert!(out.contains('o'));
        assert!(out.contains('-'));
        assert!(out.contains('+'));
    }

    #[test]
    fn output_is_deterministic() {
        let trace = small_trace();
        let a = render_ascii_plot(&trace, None, 60, 15);
        let b = render_ascii_plot(&trace, None, 60, 15);
        assert_eq!(a, b);
    }
}
