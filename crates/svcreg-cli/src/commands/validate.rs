//! Validate command
//!
//! Usage: svcreg validate [FILES...] [--all] [--conflicts]

use clap::Args;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use svcreg_core::errors::ExError;
use svcreg_core::pipeline::validate_batch;
use svcreg_core::{detect_conflicts, FileReport, Record, SchemaValidator};
use svcreg_store::{list_record_files, load_records, load_schema_document, LoadOutcome};

use super::{load_registry_config, validate_failure, CommandResult, EXIT_FAILED, EXIT_OK};
use crate::GlobalArgs;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Record files to validate
    pub files: Vec<PathBuf>,

    /// Validate every record file in the records directory
    #[arg(long)]
    pub all: bool,

    /// Check ids and aliases for conflicts across the whole record set
    #[arg(long)]
    pub conflicts: bool,
}

#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    failed: usize,
    conflicts: usize,
}

impl Tally {
    fn exit_code(&self) -> i32 {
        if self.failed == 0 && self.conflicts == 0 {
            EXIT_OK
        } else {
            EXIT_FAILED
        }
    }
}

/// Execute validate command
pub fn execute(args: ValidateArgs, global: &GlobalArgs) -> CommandResult {
    if args.files.is_empty() && !args.all && !args.conflicts {
        println!("Nothing to validate.");
        return Ok(EXIT_OK);
    }

    let config = load_registry_config(global).map_err(validate_failure)?;
    let layout = &config.layout;

    let discovered = if args.all || args.conflicts {
        list_record_files(&layout.records_dir).map_err(validate_failure)?
    } else {
        Vec::new()
    };

    let selected: Vec<PathBuf> = if args.all {
        discovered.clone()
    } else {
        let mut seen = BTreeSet::new();
        let mut unique: Vec<PathBuf> = args
            .files
            .iter()
            .filter(|path| seen.insert(file_key(path)))
            .cloned()
            .collect();
        unique.sort();
        unique
    };

    let validator = if selected.is_empty() {
        None
    } else {
        let schema = load_schema_document(&layout.schema_path).map_err(validate_failure)?;
        let validator =
            SchemaValidator::compile(&schema).map_err(|e| validate_failure(e.into()))?;
        Some(validator)
    };

    let mut tally = Tally::default();
    let mut reported: BTreeSet<PathBuf> = BTreeSet::new();

    if let Some(validator) = &validator {
        let outcomes = load_records(&selected);
        report_files(validator, outcomes, &mut tally, &mut reported);
    }

    if args.conflicts {
        let records = load_conflict_set(&discovered, &mut tally, &mut reported);
        for conflict in detect_conflicts(&records) {
            println!("CONFLICT {}", conflict);
            tally.conflicts += 1;
        }
    }

    println!(
        "{} passed, {} failed, {} conflict(s)",
        tally.passed, tally.failed, tally.conflicts
    );
    Ok(tally.exit_code())
}

fn report_files(
    validator: &SchemaValidator,
    outcomes: Vec<LoadOutcome>,
    tally: &mut Tally,
    reported: &mut BTreeSet<PathBuf>,
) {
    let mut loaded: Vec<Record> = Vec::new();
    let mut failed: Vec<(PathBuf, ExError)> = Vec::new();
    let mut order: Vec<(PathBuf, bool)> = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(record) => {
                order.push((outcome.path, true));
                loaded.push(record);
            }
            Err(err) => {
                order.push((outcome.path.clone(), false));
                failed.push((outcome.path, err));
            }
        }
    }

    let mut reports = validate_batch(validator, &loaded).into_iter();
    let mut failures = failed.into_iter();
    for (path, ok) in order {
        if ok {
            if let Some(report) = reports.next() {
                print_report(&report, tally);
            }
        } else if let Some((path, err)) = failures.next() {
            print_parse_failure(&path, &err);
            tally.failed += 1;
        }
        reported.insert(file_key(&path));
    }
}

fn print_report(report: &FileReport, tally: &mut Tally) {
    for warning in &report.warnings {
        println!("WARN {}", warning);
    }
    if report.passed() {
        println!("PASS {}", report.file);
        tally.passed += 1;
    } else {
        println!("FAIL {}", report.file);
        for violation in &report.violations {
            println!("  - {}", violation);
        }
        tally.failed += 1;
    }
}

fn print_parse_failure(path: &Path, err: &ExError) {
    println!("FAIL {}", path.display());
    println!("  - parse error: {}", err.message());
}

/// Identity of a record file independent of how its path was spelled
///
/// `servers/a.json` from the command line and `./servers/a.json` from
/// discovery name the same file. Paths that cannot be canonicalized (for
/// example a file that does not exist) are compared as given.
fn file_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Load the entire record set for conflict detection
///
/// Parse failures not already reported by the per-file pass are reported
/// here; those files take no part in conflict detection.
fn load_conflict_set(
    discovered: &[PathBuf],
    tally: &mut Tally,
    reported: &mut BTreeSet<PathBuf>,
) -> Vec<Record> {
    let mut records = Vec::new();
    for outcome in load_records(discovered) {
        match outcome.result {
            Ok(record) => records.push(record),
            Err(err) => {
                if reported.insert(file_key(&outcome.path)) {
                    print_parse_failure(&outcome.path, &err);
                    tally.failed += 1;
                }
            }
        }
    }
    records
}
