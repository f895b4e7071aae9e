//! Typed error definitions for doc_index.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocIndexError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Backup target already exists: {to} (while renaming {from})")]
    FilesystemConflict { from: PathBuf, to: PathBuf },

    #[error("Failed to write index file {path}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocIndexError {
    /// Stable short code for structured logging.
    pub fn code(&self) -> &'static str {
        match self {
            DocIndexError::NotFound(_) => "not_found",
            DocIndexError::FilesystemConflict { .. } => "fs_conflict",
            DocIndexError::WriteFailure { .. } => "write_failure",
        }
    }
}
