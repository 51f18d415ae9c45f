//! Cross-record conflict detection
//!
//! Ids and aliases share one namespace: every id must be unique, every alias
//! must be unique, and no alias may equal any other record's id.

use crate::model::{Conflict, ConflictKind, Record};
use crate::{log_op_end, log_op_start};
use std::collections::HashMap;
use std::time::Instant;

/// Token → files that claimed it, in processing order
type Claims<'a> = HashMap<&'a str, Vec<&'a str>>;

/// Detect id/alias conflicts across a loaded record set
///
/// Records are processed in slice order; that order only decides which file
/// is reported as `first`. Each colliding pair of files is reported exactly
/// once per relation, so the set of conflicts does not depend on input order.
/// N files claiming one token therefore yield N·(N−1)/2 conflicts, not N−1.
///
/// Per record:
/// 1. id already claimed as an id → `duplicate-id`, then claim it
/// 2. id claimed as an alias by another file → `id-alias-collision`
/// 3. alias already claimed as an alias → `duplicate-alias`, then claim it
/// 4. alias claimed as an id by another file → `id-alias-collision`
///
/// A record without a string id is skipped for steps 1-2; the schema
/// reports the missing id. An alias equal to the record's own id is not a
/// conflict.
pub fn detect_conflicts(records: &[Record]) -> Vec<Conflict> {
    let started = Instant::now();
    log_op_start!("detect_conflicts", record_count = records.len());

    let mut ids: Claims<'_> = HashMap::new();
    let mut aliases: Claims<'_> = HashMap::new();
    let mut conflicts = Vec::new();

    for record in records {
        let file = record.file();

        if let Some(id) = record.id() {
            let claimants = ids.entry(id).or_default();
            report(
                &mut conflicts,
                ConflictKind::DuplicateId,
                id,
                claimants.as_slice(),
                file,
            );
            claimants.push(file);

            if let Some(claimants) = aliases.get(id) {
                report(&mut conflicts, ConflictKind::IdAliasCollision, id, claimants, file);
            }
        }

        if let Some(alias) = record.alias() {
            let claimants = aliases.entry(alias).or_default();
            report(
                &mut conflicts,
                ConflictKind::DuplicateAlias,
                alias,
                claimants.as_slice(),
                file,
            );
            claimants.push(file);

            if let Some(claimants) = ids.get(alias) {
                report(
                    &mut conflicts,
                    ConflictKind::IdAliasCollision,
                    alias,
                    claimants,
                    file,
                );
            }
        }
    }

    log_op_end!(
        "detect_conflicts",
        duration_ms = started.elapsed().as_millis() as u64,
        conflict_count = conflicts.len()
    );
    conflicts
}

fn report(
    conflicts: &mut Vec<Conflict>,
    kind: ConflictKind,
    token: &str,
    claimants: &[&str],
    file: &str,
) {
    for first in claimants.iter().filter(|f| **f != file) {
        tracing::debug!(
            record_id = token,
            file = file,
            kind = kind.as_str(),
            first = *first,
            "conflict"
        );
        conflicts.push(Conflict {
            kind,
            token: token.to_string(),
            first: first.to_string(),
            second: file.to_string(),
        });
    }
}
