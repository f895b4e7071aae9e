//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates the docs root, and runs the requested passes.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::cli::Args;
use crate::config::{
    default_config_path, ensure_default_config_exists, load_config_from_xml, Config,
};
use crate::errors::DocIndexError;
use crate::logging::init_tracing;
use crate::output as out;
use crate::reconcile::{self, scan, ReconcileOptions};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var("DOC_INDEX_CONFIG") {
            out::print_info(&format!("Using DOC_INDEX_CONFIG (explicit):\n  {cfg_env}\n"));
            out::print_info("To override, unset DOC_INDEX_CONFIG or set it to another file.");
            return Ok(());
        }
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default doc_index config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. Run without --print-config to create a template.",
                    );
                }
            }
            None => {
                out::print_error("Could not determine a default config path.");
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let Some(path) = ensure_default_config_exists() {
        out::print_success(&format!(
            "A template doc_index config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit the file to set `md_file_path` and optionally `root_display_name`, `log_level` and `log_file`, then re-run. To use a different location set DOC_INDEX_CONFIG.",
        );
        return Ok(());
    }

    // Build config: XML file first, then CLI overrides (CLI wins).
    let mut cfg = match load_config_from_xml() {
        Ok(Some(loaded)) => loaded,
        Ok(None) => Config::default(),
        Err(e) => {
            out::print_error(&format!("Failed to load config: {e}"));
            return Err(e);
        }
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {e}"));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; flushing logs and exiting...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
            std::process::exit(130);
        })
        .expect("failed to install signal handler");
    }

    debug!("Starting doc_index: {:?}", args);

    let result = run_passes(&args, &cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_passes(args: &Args, cfg: &Config) -> Result<()> {
    let root = cfg.validate()?;

    let stats = scan::tree_stats(&root);
    info!(
        directories = stats.directories,
        documents = stats.documents,
        backups = stats.backups,
        "docs tree scanned"
    );

    let opts = ReconcileOptions {
        root_display_name: cfg.root_display_name.clone(),
        dry_run: cfg.dry_run,
    };

    let outcome = if args.resolve_only {
        reconcile::resolve_conflicts(&root, &opts)
    } else if args.generate_only {
        reconcile::generate_indexes(&root, &opts)
    } else {
        reconcile::reconcile(&root, &opts)
    };

    match outcome {
        Ok(()) => {
            if cfg.dry_run {
                out::print_info(&format!(
                    "Dry-run: no changes applied under '{}'",
                    root.display()
                ));
            }
            info!(root = %root.display(), "Reconciliation completed");
            Ok(())
        }
        Err(e) => {
            if let Some(de) = e.downcast_ref::<DocIndexError>() {
                let code = de.code();
                match de {
                    DocIndexError::NotFound(path) => {
                        error!(code, kind = "not_found", path = %path.display(), "Reconciliation failed")
                    }
                    DocIndexError::FilesystemConflict { from, to } => {
                        error!(code, kind = "fs_conflict", from = %from.display(), to = %to.display(), "Reconciliation failed")
                    }
                    DocIndexError::WriteFailure { path, source } => {
                        error!(code, kind = "write_failure", path = %path.display(), error = %source, "Reconciliation failed")
                    }
                }
            } else {
                error!(error = ?e, "Reconciliation failed");
            }
            Err(e)
        }
    }
}
