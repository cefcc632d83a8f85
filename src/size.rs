use crate::error::{ReportError, Result};
use std::path::Path;
use tracing::debug;

pub const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Size of an index file in MiB, taken from filesystem metadata.
pub fn file_size_mib(path: &Path) -> Result<f64> {
    let metadata = std::fs::metadata(path).map_err(|source| ReportError::InputMissing {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(ReportError::InputMissing {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "expected a regular file",
            ),
        });
    }

    let size_mib = metadata.len() as f64 / BYTES_PER_MIB;
    debug!(path = %path.display(), bytes = metadata.len(), size_mib, "measured index file");
    Ok(size_mib)
}
