//! Config validation logic.
//! Verifies that the docs root exists, is a directory and is readable before
//! any pass runs; a bad root should fail here, not halfway into a walk.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use super::types::Config;

impl Config {
    /// Validate the docs root and return it canonicalized.
    pub fn validate(&self) -> Result<PathBuf> {
        let root = self.resolved_root();

        if !root.exists() {
            bail!("Docs root does not exist: {}", root.display());
        }
        if !root.is_dir() {
            bail!("Docs root is not a directory: {}", root.display());
        }

        // readability probe
        fs::read_dir(&root).with_context(|| {
            format!(
                "Cannot read docs root '{}'; check permissions",
                root.display()
            )
        })?;
        debug!("Docs root readable: {}", root.display());

        // dunce keeps Windows paths free of \\?\ prefixes in logs and links.
        let canonical = dunce::canonicalize(&root).unwrap_or(root);
        info!("Config validated: root='{}'", canonical.display());
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn validate_accepts_existing_directory() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path());
        let root = cfg.validate().unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn validate_rejects_missing_root() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path().join("absent"));
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("does not exist"));
    }

    #[test]
    fn validate_rejects_file_root() {
        let td = tempdir().unwrap();
        let f = td.path().join("file.md");
        fs::write(&f, "x").unwrap();
        let cfg = Config::new(&f);
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("not a directory"));
    }
}
