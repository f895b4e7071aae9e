//! Directory scanning shared by both reconciliation passes.
//!
//! Defines the fixed ignore set, the "qualifying entry" filter and the
//! deterministic listing order. Note that `index.md` is part of the ignore
//! set: it never counts as qualifying content in either pass and never
//! appears in a generated listing. Its presence is always tested explicitly
//! by name instead.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::DocIndexError;

/// Canonical name of the per-directory auto-index file.
pub const INDEX_FILE: &str = "index.md";

/// Entry names excluded from every scan: build-tool scripts, shared
/// components, static assets, the build-tool config folder, and the
/// auto-index file itself.
pub const DEFAULT_IGNORES: [&str; 5] =
    ["scripts", "components", "assets", ".vitepress", INDEX_FILE];

/// A directory entry as seen by the reconciler.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    /// Qualifying = not ignored, and either a subdirectory or a `.md` file.
    pub fn qualifies(&self) -> bool {
        !is_ignored(&self.name) && (self.is_dir || self.name.ends_with(".md"))
    }
}

pub fn is_ignored(name: &str) -> bool {
    DEFAULT_IGNORES.contains(&name)
}

/// Basename of a directory as a display string. Non-UTF8 names are lossily
/// converted; the tree convention is ASCII-ish file names anyway.
pub fn dir_basename(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Name of the self-named article file for `dir` (`<basename>.md`).
pub fn self_named_file(dir: &Path) -> String {
    format!("{}.md", dir_basename(dir))
}

/// List a directory's entries in deterministic listing order: sorted by name,
/// then stably partitioned with directories after files.
///
/// A missing directory maps to [`DocIndexError::NotFound`] so callers can
/// distinguish scan races from other I/O failures.
pub fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let rd = fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::Error::from(DocIndexError::NotFound(dir.to_path_buf()))
        } else {
            anyhow::Error::from(e).context(format!("read directory '{}'", dir.display()))
        }
    })?;

    let mut entries = Vec::new();
    for item in rd {
        let item = item.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = item.path();
        // Path::is_dir follows symlinks, so a symlinked directory is treated
        // as a directory. Cycle-freedom is the caller's responsibility.
        let is_dir = path.is_dir();
        entries.push(Entry {
            name: item.file_name().to_string_lossy().into_owned(),
            path,
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.sort_by_key(|e| e.is_dir);
    Ok(entries)
}

/// Pre-run summary of a docs tree, logged by the app layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub documents: usize,
    pub backups: usize,
}

/// Count directories, Markdown documents and backup artifacts under `root`,
/// skipping ignored folders. Errors during the walk are skipped: this is a
/// diagnostic summary, not a correctness pass.
pub fn tree_stats(root: &Path) -> TreeStats {
    let mut stats = TreeStats::default();
    let walker = WalkDir::new(root).min_depth(1).into_iter();
    for entry in walker.filter_entry(|e| !is_ignored(&e.file_name().to_string_lossy())) {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            stats.directories += 1;
        } else if name.ends_with(".del.bak") {
            stats.backups += 1;
        } else if name.ends_with(".md") || name.ends_with(".MD") {
            stats.documents += 1;
        }
    }
    stats
}
