//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::MD_FILE_PATH_DEFAULT;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for a reconciliation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Docs root targeted by reconciliation; relative paths resolve against
    /// the working directory.
    pub md_file_path: PathBuf,
    /// Heading for the root index instead of the root directory's basename.
    pub root_display_name: Option<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, log actions but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            md_file_path: PathBuf::from(MD_FILE_PATH_DEFAULT),
            root_display_name: None,
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Construct a Config with an explicit docs root; other fields use defaults.
    pub fn new(md_file_path: impl Into<PathBuf>) -> Self {
        Self {
            md_file_path: md_file_path.into(),
            ..Default::default()
        }
    }

    /// Docs root resolved against the working directory.
    pub fn resolved_root(&self) -> PathBuf {
        if self.md_file_path.is_absolute() {
            self.md_file_path.clone()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&self.md_file_path))
                .unwrap_or_else(|_| self.md_file_path.clone())
        }
    }
}
