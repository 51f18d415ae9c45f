//! Build command
//!
//! Usage: svcreg build [--output <FILE>] [--check]

use anyhow::anyhow;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use svcreg_core::bundle::semantic_digest;
use svcreg_core::errors::{ExError, RegistryError};
use svcreg_core::log_op_error;
use svcreg_core::pipeline::build_bundle;
use svcreg_store::loader::partition;
use svcreg_store::{
    list_record_files, load_categories, load_records, read_bundle_digest, write_bundle,
};

use super::{build_failure, load_registry_config, CommandResult, EXIT_FAILED, EXIT_OK};
use crate::GlobalArgs;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Output file path (default: the layout's output path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compare against the existing bundle instead of writing
    #[arg(long)]
    pub check: bool,
}

/// Execute build command
pub fn execute(args: BuildArgs, global: &GlobalArgs) -> CommandResult {
    let started = Instant::now();
    let config = load_registry_config(global).map_err(build_failure)?;
    let layout = &config.layout;
    let output = args.output.unwrap_or_else(|| layout.output_path.clone());

    let categories = load_categories(&layout.categories_path).map_err(build_failure)?;
    let files = list_record_files(&layout.records_dir).map_err(build_failure)?;

    let (records, failures) = partition(load_records(&files));
    if !failures.is_empty() {
        for err in &failures {
            log_op_error!(
                "build",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            eprintln!("FAIL {}: {}", err.file().unwrap_or("<unknown>"), err.message());
        }
        return Err(build_failure(anyhow!(
            "{} record file(s) failed to load; bundle not written",
            failures.len()
        )));
    }

    let out = build_bundle(&records, categories, &config.bundle, Utc::now());
    for warning in &out.warnings {
        println!("WARN {}", warning);
    }
    let digest = semantic_digest(&out.bundle)
        .map_err(|e| build_failure(ExError::from(e)))?;
    let server_count = out.bundle.servers.len();

    if args.check {
        let existing = read_bundle_digest(&output).map_err(build_failure)?;
        if existing.as_deref() == Some(digest.as_str()) {
            println!(
                "Bundle is up to date: {} ({} servers, digest {})",
                output.display(),
                server_count,
                digest
            );
            return Ok(EXIT_OK);
        }
        let stale: ExError = RegistryError::StaleBundle {
            path: output.display().to_string(),
            expected: digest,
            found: existing.unwrap_or_else(|| "<missing>".to_string()),
        }
        .into();
        tracing::warn!(err_code = stale.code(), "{}", stale);
        println!("Bundle is stale: {}", output.display());
        return Ok(EXIT_FAILED);
    }

    write_bundle(&output, &out.bundle).map_err(build_failure)?;
    println!(
        "Wrote {} ({} servers, digest {})",
        output.display(),
        server_count,
        digest
    );
    Ok(EXIT_OK)
}
