//! Formatted terminal output for fit runs.

use crate::domain::{PeakRow, Trace};

/// Header of the parameter table, shared with the CSV exports.
pub const PEAK_TABLE_HEADER: [&str; 6] = ["Peak", "y0", "Area", "xc", "Amp", "w"];

/// Format the run summary: dataset stats plus the fit outcome line.
pub fn format_run_summary(trace: &Trace, status: &str) -> String {
    let stats = trace.stats();
    let mut out = String::new();

    out.push_str("=== gq - trace decomposition ===\n");
    out.push_str(&format!("Trace: {}\n", trace.name));
    out.push_str(&format!(
        "Points: n={} | x=[{:.2}, {:.2}] | y=[{:.2}, {:.2}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    ));
    out.push_str(&format!("Status: {status}\n"));
    out
}

/// Format the peak parameter table.
pub fn format_peak_table(rows: &[PeakRow]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<6} {:>10} {:>12} {:>10} {:>10} {:>8}\n",
            PEAK_TABLE_HEADER[0],
            PEAK_TABLE_HEADER[1],
            PEAK_TABLE_HEADER[2],
            PEAK_TABLE_HEADER[3],
            PEAK_TABLE_HEADER[4],
            PEAK_TABLE_HEADER[5],
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<6} {:-<10} {:-<12} {:-<10} {:-<10} {:-<8}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no peaks)\n");
        return out;
    }

    for row in rows {
        out.push_str(
            format!(
                "{:<6} {:>10.3} {:>12.3} {:>10.3} {:>10.3} {:>8.3}\n",
                row.peak, row.y0, row.area, row.center, row.amplitude, row.width
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}
