//! Record loader
//!
//! Parses record files by extension. A parse failure belongs to one file;
//! the caller decides whether it is fatal.

use crate::errors::{parse_error, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use svcreg_core::errors::ExError;
use svcreg_core::{log_op_end, log_op_start, Record};

/// Outcome of loading one file in a batch
#[derive(Debug)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub result: Result<Record>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn parse_document(path: &Path, content: &str) -> Result<Value> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| parse_error(path, e)),
        _ => serde_json::from_str(content).map_err(|e| parse_error(path, e)),
    }
}

/// Read and parse one record file
///
/// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns `Parse` if the file is unreadable, malformed, or not an object
/// at the top level.
pub fn load_record(path: &Path) -> Result<Record> {
    let content = fs::read_to_string(path).map_err(|e| parse_error(path, e))?;
    let value = parse_document(path, &content)?;
    let file = path.display().to_string();

    Record::from_value(file, value)
        .ok_or_else(|| parse_error(path, "top-level value must be an object"))
}

/// Load a batch of record files in the given order, one outcome per file
pub fn load_records(paths: &[PathBuf]) -> Vec<LoadOutcome> {
    let started = Instant::now();
    log_op_start!("load_records", record_count = paths.len());

    let outcomes: Vec<LoadOutcome> = paths
        .iter()
        .map(|path| LoadOutcome {
            path: path.clone(),
            result: load_record(path),
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    log_op_end!(
        "load_records",
        duration_ms = started.elapsed().as_millis() as u64,
        failed = failed
    );
    outcomes
}

/// Split outcomes into loaded records and failures, keeping order
pub fn partition(outcomes: Vec<LoadOutcome>) -> (Vec<Record>, Vec<ExError>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(record) => records.push(record),
            Err(err) => failures.push(err),
        }
    }
    (records, failures)
}
