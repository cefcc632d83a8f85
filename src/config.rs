use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The six benchmark artifacts a report is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInputs {
    /// Timing record of the FastSeek indexing run
    pub fastseek_index_time: PathBuf,
    /// Timing record of the FastSeek search run
    pub fastseek_search_time: PathBuf,
    /// Timing record of the Samtools indexing run
    pub samtools_index_time: PathBuf,
    /// Timing record of the Samtools search run
    pub samtools_search_time: PathBuf,
    /// Index written by FastSeek
    pub fastseek_index_file: PathBuf,
    /// Index written by Samtools
    pub samtools_index_file: PathBuf,
}

/// Everything one report run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub inputs: ReportInputs,
    /// Where the SVG chart is written
    pub output: PathBuf,
}

impl ReportConfig {
    /// Build from six input paths followed by the output path.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let [
            fastseek_index_time,
            fastseek_search_time,
            samtools_index_time,
            samtools_search_time,
            fastseek_index_file,
            samtools_index_file,
            output,
        ] = paths
        else {
            return Err(ReportError::Config(format!(
                "expected 6 input paths and 1 output path, got {} path(s)",
                paths.len()
            )));
        };

        Ok(Self {
            inputs: ReportInputs {
                fastseek_index_time: fastseek_index_time.clone(),
                fastseek_search_time: fastseek_search_time.clone(),
                samtools_index_time: samtools_index_time.clone(),
                samtools_search_time: samtools_search_time.clone(),
                fastseek_index_file: fastseek_index_file.clone(),
                samtools_index_file: samtools_index_file.clone(),
            },
            output: output.clone(),
        })
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ReportError::InputMissing {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
