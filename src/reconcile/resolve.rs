//! Conflict resolution pass.
//!
//! Walks the tree depth-first and normalizes each directory's naming of the
//! auto-index file (`index.md`) versus the self-named article file
//! (`<basename>.md`) before any index is generated. All mutations are
//! renames; nothing is created or deleted in this pass, so running it twice
//! changes nothing the second time.
//!
//! Per directory, with `has_index` / `has_self_named` tested by literal name
//! and `has_other` meaning any qualifying entry besides the self-named file
//! (`index.md` is in the ignore set and never counts):
//!
//! - index only, nothing else  -> promote: rename `index.md` to `<basename>.md`
//! - index + self-named only   -> back up the redundant `index.md`
//! - index + self-named + more -> back up the now-invalid `<basename>.md`
//! - anything else             -> no action

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use super::scan::{self, INDEX_FILE};
use super::ReconcileOptions;
use crate::errors::DocIndexError;

/// Normalize naming within `dir`, then recurse into every qualifying
/// subdirectory. A failed rename leaves the directory for manual inspection
/// and is reported once the rest of the walk has been attempted: siblings are
/// best-effort, the first structural error still bubbles to the caller.
pub fn resolve_conflicts(dir: &Path, opts: &ReconcileOptions) -> Result<()> {
    let entries = scan::read_entries(dir)?;
    let self_named = scan::self_named_file(dir);

    let has_index = entries.iter().any(|e| e.name == INDEX_FILE);
    let has_self_named = entries.iter().any(|e| e.name == self_named);
    let has_other = entries
        .iter()
        .any(|e| e.qualifies() && e.name != self_named);

    let mut first_err: Option<anyhow::Error> = None;

    let action = if has_index && !has_self_named && !has_other {
        let from = dir.join(INDEX_FILE);
        let to = dir.join(&self_named);
        info!(
            dir = %dir.display(),
            "sole index in a single-article directory; promoting to self-named file"
        );
        promote(&from, &to, opts.dry_run)
    } else if has_index && has_self_named && !has_other {
        info!(
            dir = %dir.display(),
            "self-named article already present; index file is redundant"
        );
        super::backup::backup_rename(&dir.join(INDEX_FILE), opts.dry_run).map(|_| ())
    } else if has_index && has_self_named && has_other {
        info!(
            dir = %dir.display(),
            "directory holds multiple entries; self-named article convention no longer valid"
        );
        super::backup::backup_rename(&dir.join(&self_named), opts.dry_run).map(|_| ())
    } else {
        Ok(())
    };

    if let Err(e) = action {
        warn!(dir = %dir.display(), error = %e, "conflict resolution left directory inconsistent");
        first_err = Some(e);
    }

    // Recursion set comes from the pre-rename scan; this directory's own
    // renames never touch its subdirectories.
    for entry in entries.iter().filter(|e| e.is_dir && e.qualifies()) {
        if let Err(e) = resolve_conflicts(&entry.path, opts) {
            error!(dir = %entry.path.display(), error = %e, "subtree resolution failed");
            if first_err.is_none() {
                first_err = Some(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn promote(from: &Path, to: &Path, dry_run: bool) -> Result<()> {
    if to.exists() {
        return Err(DocIndexError::FilesystemConflict {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        }
        .into());
    }
    if dry_run {
        info!(from = %from.display(), to = %to.display(), "dry-run: would rename");
        return Ok(());
    }
    fs::rename(from, to).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::Error::from(DocIndexError::NotFound(from.to_path_buf()))
        } else {
            anyhow::Error::from(e).context(format!(
                "rename '{}' -> '{}'",
                from.display(),
                to.display()
            ))
        }
    })?;
    info!(from = %from.display(), to = %to.display(), "renamed");
    Ok(())
}
