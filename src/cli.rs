//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `--root` takes precedence over the positional ROOT.
//! - `--debug` is a shorthand for `--log-level debug`.
//! - `--resolve-only` / `--generate-only` run a single pass; by default the
//!   full reconciliation (resolve, then generate) runs.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the doc_index library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Reconcile a Markdown docs tree and regenerate per-directory indexes"
)]
pub struct Args {
    /// Docs root to reconcile (overrides the configured md_file_path).
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root_pos: Option<PathBuf>,

    /// Explicit docs root option; overrides the positional ROOT.
    #[arg(
        long = "root",
        short = 'r',
        value_name = "PATH",
        value_hint = ValueHint::DirPath,
        help = "Docs root (overrides positional)"
    )]
    pub root: Option<PathBuf>,

    /// Heading for the root index instead of the root directory's name.
    #[arg(long, value_name = "NAME", help = "Display name for the root index heading")]
    pub root_name: Option<String>,

    /// Only run conflict resolution; skip index generation.
    #[arg(long, conflicts_with = "generate_only")]
    pub resolve_only: bool,

    /// Only run index generation; skip conflict resolution.
    #[arg(long)]
    pub generate_only: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where doc_index will look for the config file (or DOC_INDEX_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by doc_index and exit"
    )]
    pub print_config: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective docs root: `--root` if provided, else positional ROOT.
    #[inline]
    pub fn resolved_root(&self) -> Option<PathBuf> {
        self.root.clone().or_else(|| self.root_pos.clone())
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = self.resolved_root() {
            cfg.md_file_path = root;
        }
        if let Some(name) = &self.root_name {
            cfg.root_display_name = Some(name.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
