//! Error types for report generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a report from being produced. All of them abort the run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Input missing: {}: {source}", .path.display())]
    InputMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed timing record {}: {reason}", .path.display())]
    FormatViolation { path: PathBuf, reason: String },

    #[error("Invalid metric value for {metric}: {value}")]
    InvalidMetric { metric: String, value: f64 },

    #[error("Failed to write output {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Config(err.to_string())
    }
}

/// Reject values that cannot be drawn as a bar height.
pub fn ensure_valid_metric(metric: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ReportError::InvalidMetric {
            metric: metric.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_file() {
        let err = ReportError::FormatViolation {
            path: PathBuf::from("bench/fastseek_index.tsv"),
            reason: "missing data line".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bench/fastseek_index.tsv"));
        assert!(msg.contains("missing data line"));
    }

    #[test]
    fn test_ensure_valid_metric() {
        assert_eq!(ensure_valid_metric("x", 0.0).unwrap(), 0.0);
        assert_eq!(ensure_valid_metric("x", 12.5).unwrap(), 12.5);

        for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match ensure_valid_metric("search time", bad) {
                Err(ReportError::InvalidMetric { metric, .. }) => assert_eq!(metric, "search time"),
                other => panic!("expected InvalidMetric, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_json_error_becomes_config_error() {
        let err: ReportError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, ReportError::Config(_)));
    }
}
