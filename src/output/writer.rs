// src/output/writer.rs

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::errors::{ActrunError, Result};
use crate::fs::FileSystem;

use super::OutputRecord;

/// Environment variable naming the result file.
pub const OUTPUT_ENV_VAR: &str = "DRONE_OUTPUT";

/// Persists an [`OutputRecord`] to the destination named by `DRONE_OUTPUT`.
///
/// The destination is captured when the writer is built but only checked
/// when [`ResultWriter::write`] is called, so a run without a destination
/// fails at the point it tries to report outputs.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    destination: Option<OsString>,
    fs: Arc<dyn FileSystem>,
}

impl ResultWriter {
    pub fn new(destination: Option<impl Into<OsString>>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            destination: destination.map(Into::into),
            fs,
        }
    }

    /// Read the destination from the process environment.
    pub fn from_env(fs: Arc<dyn FileSystem>) -> Self {
        Self::new(std::env::var_os(OUTPUT_ENV_VAR), fs)
    }

    /// Resolved destination path, if one is configured.
    pub fn destination(&self) -> Option<PathBuf> {
        self.destination
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// Overwrite the destination with one `key=value` line per output.
    ///
    /// An empty record still produces an (empty) file.
    pub fn write(&self, record: &OutputRecord) -> Result<PathBuf> {
        let path = self
            .destination()
            .ok_or(ActrunError::OutputDestinationUnset(OUTPUT_ENV_VAR))?;

        self.fs
            .write(&path, record.to_lines().as_bytes())
            .map_err(|cause| ActrunError::ResultWrite {
                path: path.clone(),
                cause,
            })?;

        info!(path = %path.display(), outputs = record.len(), "wrote action outputs");
        Ok(path)
    }
}
