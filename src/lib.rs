//! Core library for `doc_index`.
//!
//! Keeps a directory tree of Markdown documents consistent with a naming
//! convention and regenerates per-directory navigation indexes. A run is two
//! strictly sequential passes over the same root:
//!
//! 1. [`resolve_conflicts`] normalizes each directory's `index.md` vs
//!    `<basename>.md` naming via rename-only mutations (doomed files become
//!    timestamped `.del.bak` backups, never deletions).
//! 2. [`generate_indexes`] writes each directory's `index.md` listing,
//!    children first, skipping byte-identical writes.
//!
//! Both passes are idempotent: re-running on a consistent tree changes
//! nothing. The library assumes a single writer; callers must not run two
//! reconciliations over overlapping subtrees at once.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod output;
pub mod reconcile;

pub use config::{Config, LogLevel};
pub use errors::DocIndexError;
pub use reconcile::{
    extract_title, generate_indexes, reconcile, resolve_conflicts, ReconcileOptions,
};
