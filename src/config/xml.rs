//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a template if missing (unless DOC_INDEX_CONFIG is set).
//!
//! Unknown XML fields are a hard error (deny_unknown_fields) so
//! misconfigurations surface early instead of being silently ignored.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, path_has_symlink_ancestor, CONFIG_ENV};
use super::types::{Config, LogLevel};
use super::MD_FILE_PATH_DEFAULT;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    md_file_path: Option<String>,
    root_display_name: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = parsed.md_file_path.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.md_file_path = PathBuf::from(trimmed);
        }
    }
    if let Some(s) = parsed.root_display_name.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.root_display_name = Some(trimmed.to_string());
        }
    }
    if let Some(s) = parsed.log_level.as_deref()
        && let Ok(level) = s.trim().parse::<LogLevel>()
    {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the effective Config file: DOC_INDEX_CONFIG if set (must parse), else
/// the platform default path when it exists. `Ok(None)` when no file is
/// present.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let cfg = load_config_from_xml_path(Path::new(&p))?;
        return Ok(Some(cfg));
    }
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some(cfg))
}

/// Create the template config file and parent directory.
/// Refuses symlinked ancestors so the template cannot be planted elsewhere.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let content = format!(
        "<!--\n  doc_index configuration (XML)\n\n  Fields:\n    md_file_path       -> docs root to reconcile, relative to the working directory\n    root_display_name  -> heading for the root index (defaults to the directory name)\n    log_level          -> quiet | normal | info | debug\n    log_file           -> path to log file (optional; stdout still used)\n\n  Notes:\n    - CLI flags override XML values.\n    - Unknown fields are rejected.\n-->\n<config>\n  <md_file_path>{}</md_file_path>\n  <log_level>normal</log_level>\n</config>\n",
        MD_FILE_PATH_DEFAULT
    );

    fs::write(path, content)
        .with_context(|| format!("write template config '{}'", path.display()))?;
    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create the default config if DOC_INDEX_CONFIG is not set; return the
/// created path so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        return None;
    }

    let cfg_path = default_config_path()?;
    if cfg_path.exists() {
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}
