//! Request-scoped temporary copy of an uploaded file

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;

const TEMP_PREFIX: &str = "upload-";

/// Temporary file holding one upload. Removed when the guard is dropped,
/// whichever way the request ends.
pub struct TempUpload {
    file: Option<NamedTempFile>,
    path: PathBuf,
}

impl TempUpload {
    /// Write `data` to a uniquely named file in `dir` (or the OS temp dir)
    pub fn create(dir: Option<&Path>, extension: &str, data: &[u8]) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(extension);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(data)?;
        file.flush()?;

        let path = file.path().to_path_buf();
        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());

        Ok(Self {
            file: Some(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                tracing::warn!("Failed to remove temp upload {}: {}", self.path.display(), e);
            }
        }
    }
}
