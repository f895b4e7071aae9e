//! Tree reconciliation: conflict resolution followed by index generation.
//!
//! The two passes run in strict sequence over the same root; all data flows
//! through the filesystem itself, no in-memory tree survives between them.
//! Traversal is single-threaded and depth-first; sibling order is part of
//! the contract (it fixes listing order), so nothing here parallelizes.

pub mod backup;
mod generate;
mod resolve;
pub mod scan;
mod title;

pub use generate::generate_indexes;
pub use resolve::resolve_conflicts;
pub use title::extract_title;

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::errors::DocIndexError;

/// Options threaded explicitly through both passes. There is deliberately no
/// module-level option state; concurrent invocations on disjoint roots never
/// observe each other's settings.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Heading used for the root directory's index instead of its basename.
    pub root_display_name: Option<String>,
    /// Log every mutation without touching the filesystem.
    pub dry_run: bool,
}

/// One full reconciliation run: resolve naming conflicts, then regenerate
/// indexes. Generation only starts on a conflict-free tree.
pub fn reconcile(root: &Path, opts: &ReconcileOptions) -> Result<()> {
    if !root.is_dir() {
        return Err(DocIndexError::NotFound(root.to_path_buf()).into());
    }
    info!(root = %root.display(), "resolving naming conflicts");
    resolve_conflicts(root, opts)?;
    info!(root = %root.display(), "generating indexes");
    generate_indexes(root, opts)?;
    info!(root = %root.display(), "reconciliation finished");
    Ok(())
}
