//! Timestamped backup renames.
//!
//! Destructive operations in the reconciler never delete: the doomed file is
//! renamed to `<name>.<YYYYMMDD_HH_MM_SS>.del.bak` next to itself, so every
//! run is recoverable by hand. Backups are never cleaned up automatically.

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::DocIndexError;

/// Local-time stamp used in backup file names (24-hour clock).
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H_%M_%S").to_string()
}

/// Backup target for `path`: the full file name with `.<ts>.del.bak` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    path.with_file_name(format!("{}.{}.del.bak", name, timestamp()))
}

/// Rename `path` to its timestamped backup target and return the target.
///
/// A pre-existing target (possible only with two renames of the same name
/// within one second) is a [`DocIndexError::FilesystemConflict`]; no retry is
/// attempted and the directory is left as-is for inspection. `dry_run` logs
/// the rename and touches nothing.
pub fn backup_rename(path: &Path, dry_run: bool) -> Result<PathBuf> {
    let target = backup_path(path);
    if target.exists() {
        return Err(DocIndexError::FilesystemConflict {
            from: path.to_path_buf(),
            to: target,
        }
        .into());
    }
    if dry_run {
        info!(from = %path.display(), to = %target.display(), "dry-run: would back up");
        return Ok(target);
    }
    fs::rename(path, &target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::Error::from(DocIndexError::NotFound(path.to_path_buf()))
        } else {
            anyhow::Error::from(e).context(format!(
                "back up '{}' -> '{}'",
                path.display(),
                target.display()
            ))
        }
    })?;
    info!(from = %path.display(), to = %target.display(), "backed up");
    Ok(target)
}
