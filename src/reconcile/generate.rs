//! Index generation pass.
//!
//! Runs over a conflict-free tree (after [`super::resolve`]) and gives every
//! multi-entry directory an `index.md` navigation listing: a `# <name>`
//! heading followed by one bullet per qualifying entry. Subdirectories are
//! regenerated before their parent decides how to link to them, so link
//! targets always reflect fresh state; display titles are read beforehand,
//! so authored headings win. Writes are skipped when the existing file is
//! byte-identical, which keeps a consistent tree mtime-stable and makes the
//! whole pass a no-op on re-run.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::scan::{self, Entry, INDEX_FILE};
use super::{backup, title, ReconcileOptions};
use crate::errors::DocIndexError;

/// Generate or remove auto-index content for `root` and every qualifying
/// subdirectory. `opts.root_display_name` overrides the heading of the root
/// index only; every other directory is headed by its basename.
pub fn generate_indexes(root: &Path, opts: &ReconcileOptions) -> Result<()> {
    generate_dir(root, opts.root_display_name.as_deref(), opts)
}

fn generate_dir(dir: &Path, display_name: Option<&str>, opts: &ReconcileOptions) -> Result<()> {
    let basename = scan::dir_basename(dir);
    let self_named = scan::self_named_file(dir);
    let entries = scan::read_entries(dir)?;
    let qualifying: Vec<&Entry> = entries.iter().filter(|e| e.qualifies()).collect();

    // Name dropped from the listing by the stale self-named cleanup below.
    let mut pruned: Option<&str> = None;

    if qualifying.len() == 1 && qualifying[0].name == self_named {
        // Single-article leaf: the self-named file is the directory's whole
        // content. It keeps the directory's name, gets no index, and is not
        // recursed into. Any stale index left over from a previous shape is
        // backed up.
        let stale = dir.join(INDEX_FILE);
        if stale.exists() {
            info!(dir = %dir.display(), "single-article leaf; removing stale index");
            backup::backup_rename(&stale, opts.dry_run)?;
        }
        return Ok(());
    }
    if qualifying.len() == 1 {
        // The sole entry is something else, yet a self-named file may linger
        // from an external mutation. Self-naming is valid only as the sole
        // qualifying entry, so it goes.
        if dir.join(&self_named).exists() {
            info!(dir = %dir.display(), file = %self_named, "stale self-named file; backing up");
            backup::backup_rename(&dir.join(&self_named), opts.dry_run)?;
            pruned = Some(self_named.as_str());
        }
    } else if qualifying.len() > 1 && qualifying.iter().any(|e| e.name == self_named) {
        // Multi-entry directory: the self-named convention no longer applies.
        info!(dir = %dir.display(), file = %self_named, "self-named file in multi-entry directory; backing up");
        backup::backup_rename(&dir.join(&self_named), opts.dry_run)?;
        pruned = Some(self_named.as_str());
    }

    let heading = display_name.unwrap_or(&basename);
    let mut content = format!("# {heading}\n");
    let mut listed = false;

    for entry in &entries {
        if scan::is_ignored(&entry.name) || pruned == Some(entry.name.as_str()) {
            continue;
        }
        if entry.is_dir {
            // Title is read before the child is regenerated: a heading the
            // author wrote wins over the heading regeneration is about to
            // produce, and survives even when the file itself is renamed
            // aside. The link target is decided after, from fresh state.
            let label = subdir_title(&entry.path, &entry.name);
            generate_dir(&entry.path, None, opts)?;
            let label = label.unwrap_or_else(|| entry.name.clone());
            if entry.path.join(INDEX_FILE).exists() {
                content.push_str(&format!("- [{}](./{}/)\n", label, entry.name));
                listed = true;
            } else if entry.path.join(format!("{}.md", entry.name)).exists() {
                content.push_str(&format!(
                    "- [{}](./{}/{}.md)\n",
                    label, entry.name, entry.name
                ));
                listed = true;
            }
            // Neither file: the child is empty or non-document; no line.
        } else if entry.name.ends_with(".md") {
            let label =
                title::extract_title(&entry.path).unwrap_or_else(|| entry.name.clone());
            content.push_str(&format!("- [{}](./{})\n", label, entry.name));
            listed = true;
        }
    }

    if !listed {
        // A directory with nothing to list owns no index at all. Writing a
        // heading-only file here would hand the resolver a sole index to
        // promote on the next run, so the tree would never settle.
        let stale = dir.join(INDEX_FILE);
        if stale.exists() {
            info!(dir = %dir.display(), "nothing to list; removing stale index");
            backup::backup_rename(&stale, opts.dry_run)?;
        }
        return Ok(());
    }

    write_if_changed(&dir.join(INDEX_FILE), &content, opts.dry_run)
}

/// Display title for a subdirectory link: the child's `index.md` heading,
/// then the `index.MD` case-variant, then the child's self-named file.
fn subdir_title(child: &Path, name: &str) -> Option<String> {
    title::extract_title(&child.join("index.md"))
        .or_else(|| title::extract_title(&child.join("index.MD")))
        .or_else(|| title::extract_title(&child.join(format!("{name}.md"))))
}

/// Write `content` to `path` unless it is already byte-identical. Skipping
/// the write keeps mtimes stable and avoids spurious watcher notifications.
fn write_if_changed(path: &Path, content: &str, dry_run: bool) -> Result<()> {
    if let Ok(existing) = fs::read_to_string(path)
        && existing == content
    {
        debug!(path = %path.display(), "index unchanged; skipping write");
        return Ok(());
    }
    if dry_run {
        info!(path = %path.display(), "dry-run: would write index");
        return Ok(());
    }
    fs::write(path, content).map_err(|e| DocIndexError::WriteFailure {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), "index written");
    Ok(())
}
