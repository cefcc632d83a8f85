use crate::error::{ensure_valid_metric, ReportError, Result};
use std::path::Path;
use tracing::debug;

/// Read a benchmark timing record and return its elapsed wall-clock seconds.
///
/// The record is tab-separated text: a header line, then a data line whose
/// first field is the elapsed time. Only the first data line is used.
pub fn parse_elapsed_seconds(path: &Path) -> Result<f64> {
    let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::InvalidData => ReportError::FormatViolation {
            path: path.to_path_buf(),
            reason: "record is not valid UTF-8 text".to_string(),
        },
        _ => ReportError::InputMissing {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let seconds = parse_record(&contents).map_err(|reason| ReportError::FormatViolation {
        path: path.to_path_buf(),
        reason,
    })?;
    let seconds = ensure_valid_metric(&path.display().to_string(), seconds)?;

    debug!(path = %path.display(), seconds, "parsed timing record");
    Ok(seconds)
}

fn parse_record(contents: &str) -> std::result::Result<f64, String> {
    let line_count = contents.lines().count();
    let data_line = contents
        .lines()
        .nth(1)
        .ok_or_else(|| format!("expected a header and a data line, found {} line(s)", line_count))?;

    let field = data_line.split('\t').next().unwrap_or_default().trim();
    if field.is_empty() {
        return Err("data line has an empty first field".to_string());
    }

    field
        .parse::<f64>()
        .map_err(|e| format!("first field {:?} is not a number: {}", field, e))
}
