//! Flat CSV exports, appended across sessions.
//!
//! Two sinks, both written next to the source data and grown by appending
//! so results from multiple traces accumulate in one place:
//!
//! - `export.csv`: per-peak detail rows prefixed with the trace name,
//!   separated per session by a blank spacer row
//! - `areas.csv`: one fixed-width row per trace with up to six peak areas

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::domain::PeakRow;
use crate::error::AppError;
use crate::report::PEAK_TABLE_HEADER;

/// Column capacity of the area summary row.
pub const AREA_SUMMARY_PEAKS: usize = 6;

fn open_append(path: &Path) -> Result<(csv::Writer<std::fs::File>, bool), AppError> {
    let existed = path.is_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;
    // Flexible: the spacer row is shorter than the data rows.
    let writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
    Ok((writer, existed))
}

fn write_failure(path: &Path, e: csv::Error) -> AppError {
    AppError::new(2, format!("Failed to write '{}': {e}", path.display()))
}

/// Append the per-peak detail table to `export.csv` in `dir`.
///
/// The header is written once, when the file is created; each call adds a
/// blank spacer row followed by one row per peak.
pub fn append_peak_table(
    dir: &Path,
    trace_name: &str,
    rows: &[PeakRow],
) -> Result<PathBuf, AppError> {
    let path = dir.join("export.csv");
    let (mut writer, existed) = open_append(&path)?;

    if !existed {
        let mut header = vec!["filename"];
        header.extend(PEAK_TABLE_HEADER);
        writer
            .write_record(&header)
            .map_err(|e| write_failure(&path, e))?;
    }
    writer
        .write_record([""])
        .map_err(|e| write_failure(&path, e))?;

    for row in rows {
        writer
            .write_record([
                trace_name.to_string(),
                row.peak.to_string(),
                row.y0.to_string(),
                row.area.to_string(),
                row.center.to_string(),
                row.amplitude.to_string(),
                row.width.to_string(),
            ])
            .map_err(|e| write_failure(&path, e))?;
    }

    writer.flush().map_err(|e| {
        AppError::new(2, format!("Failed to flush '{}': {e}", path.display()))
    })?;
    Ok(path)
}

/// Append one fixed-width area summary row to `areas.csv` in `dir`.
///
/// The row holds the trace name and up to six peak areas; missing peaks
/// leave their column empty so every row has the same shape.
pub fn append_area_summary(
    dir: &Path,
    trace_name: &str,
    rows: &[PeakRow],
) -> Result<PathBuf, AppError> {
    let path = dir.join("areas.csv");
    let (mut writer, existed) = open_append(&path)?;

    if !existed {
        let mut header = vec!["Filename".to_string()];
        for peak in 1..=AREA_SUMMARY_PEAKS {
            header.push(format!("Peak {peak}"));
        }
        writer
            .write_record(&header)
            .map_err(|e| write_failure(&path, e))?;
    }

    let mut record = vec![trace_name.to_string()];
    for index in 0..AREA_SUMMARY_PEAKS {
        record.push(
            rows.get(index)
                .map(|row| row.area.to_string())
                .unwrap_or_default(),
        );
    }
    writer
        .write_record(&record)
        .map_err(|e| write_failure(&path, e))?;

    writer.flush().map_err(|e| {
        AppError::new(2, format!("Failed to flush '{}': {e}", path.display()))
    })?;
    Ok(path)
}
