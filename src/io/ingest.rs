//! CSV trace ingest.
//!
//! This module turns a two-column x,y CSV (e.g. an ImageJ plot-profile
//! export) into a validated `Trace`.
//!
//! Design goals:
//! - **Tolerant header handling**: a leading non-numeric row is skipped
//! - **Row-level errors** with line numbers (exit code 2)
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::path::Path;

use crate::domain::Trace;
use crate::error::AppError;

/// Read a two-column x,y CSV into a trace.
///
/// The first row is treated as a header and skipped when its columns do not
/// parse as numbers; every later row must parse. Blank rows are ignored.
pub fn read_trace_csv(path: &Path) -> Result<Trace, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let line = index + 1;
        let record = record
            .map_err(|e| AppError::new(2, format!("Malformed CSV at line {line}: {e}")))?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() < 2 {
            return Err(AppError::new(
                2,
                format!("Expected two columns at line {line}, got {}.", record.len()),
            ));
        }

        match (record[0].parse::<f64>(), record[1].parse::<f64>()) {
            (Ok(xv), Ok(yv)) => {
                x.push(xv);
                y.push(yv);
            }
            // A leading header row (ImageJ writes one) is fine to skip.
            _ if index == 0 => continue,
            _ => {
                return Err(AppError::new(
                    2,
                    format!("Non-numeric value at line {line}: '{}', '{}'.", &record[0], &record[1]),
                ));
            }
        }
    }

    let mut trace = Trace::from_xy(Trace::name_from_path(path), x, y)?;
    trace.path = Some(path.to_path_buf());
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("gq_ingest_{}_{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_plain_two_column_csv() {
        let path = write_temp("plain.csv", "0.0,1.5\n0.5,2.5\n1.0,3.5\n");
        let trace = read_trace_csv(&path).unwrap();
        assert_eq!(trace.x, vec![0.0, 0.5, 1.0]);
        assert_eq!(trace.y, vec![1.5, 2.5, 3.5]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn skips_a_header_row() {
        let path = write_temp("header.csv", "Distance_(cm),Gray_Value\n0.0,1.5\n0.5,2.5\n");
        let trace = read_trace_csv(&path).unwrap();
        assert_eq!(trace.x.len(), 2);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_non_numeric_rows_after_the_header() {
        let path = write_temp("bad.csv", "0.0,1.5\noops,2.5\n");
        let err = read_trace_csv(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn trace_name_is_the_file_stem() {
        let path = write_temp("lane_2.csv", "0.0,1.0\n1.0,2.0\n");
        let trace = read_trace_csv(&path).unwrap();
        assert!(trace.name.contains("lane_2"));
        std::fs::remove_file(path).ok();
    }
}
