//! Pipeline orchestration
//!
//! Two independent pipelines over already-loaded records:
//! - validate: sanitize → schema-check each record
//! - build: sanitize → enrich → assemble the bundle
//!
//! Callers pass records in a fixed processing order (sorted file references);
//! every output here preserves that order.

use crate::bundle::{assemble_bundle, Bundle, BundleOptions};
use crate::enrich::enrich_record_at;
use crate::model::{Category, Record, Violation};
use crate::rules::sanitize::{sanitize, SanitizeWarning};
use crate::schema::SchemaValidator;
use crate::{log_op_end, log_op_start};
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Sanitizer warnings and schema violations for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub warnings: Vec<SanitizeWarning>,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Sanitize and validate one record
pub fn validate_record(validator: &SchemaValidator, record: &Record) -> FileReport {
    let sanitized = sanitize(record);
    let report = validator.validate(&sanitized.record);
    FileReport {
        file: record.file().to_string(),
        warnings: sanitized.warnings,
        violations: report.violations,
    }
}

/// Sanitize and validate a batch; one report per record, in input order
pub fn validate_batch(validator: &SchemaValidator, records: &[Record]) -> Vec<FileReport> {
    let started = Instant::now();
    log_op_start!("validate_batch", record_count = records.len());

    let reports: Vec<FileReport> = records
        .iter()
        .map(|r| validate_record(validator, r))
        .collect();

    let violation_count: usize = reports.iter().map(|r| r.violations.len()).sum();
    log_op_end!(
        "validate_batch",
        duration_ms = started.elapsed().as_millis() as u64,
        violation_count = violation_count
    );
    reports
}

/// Result of the build pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub bundle: Bundle,
    pub warnings: Vec<SanitizeWarning>,
}

/// Sanitize, enrich and assemble a complete record set
///
/// `now` stamps both the bundle and every record's timestamps.
pub fn build_bundle(
    records: &[Record],
    categories: Vec<Category>,
    options: &BundleOptions,
    now: DateTime<Utc>,
) -> BuildOutput {
    let started = Instant::now();
    log_op_start!("build_bundle", record_count = records.len());

    let mut warnings = Vec::new();
    let enriched = records
        .iter()
        .map(|record| {
            let sanitized = sanitize(record);
            warnings.extend(sanitized.warnings);
            enrich_record_at(&sanitized.record, now)
        })
        .collect();

    let bundle = assemble_bundle(enriched, categories, options, now);

    log_op_end!(
        "build_bundle",
        duration_ms = started.elapsed().as_millis() as u64,
        record_count = bundle.servers.len()
    );
    BuildOutput { bundle, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn record(file: &str, value: Value) -> Record {
        Record::from_value(file, value).unwrap()
    }

    fn validator() -> SchemaValidator {
        SchemaValidator::compile(&json!({
            "type": "object",
            "required": ["id", "name"],
            "properties": {"id": {"type": "string"}, "name": {"type": "string"}},
            "additionalProperties": true
        }))
        .unwrap()
    }

    #[test]
    fn test_validation_sees_sanitized_record() {
        let strict = SchemaValidator::compile(&json!({
            "type": "object",
            "properties": {"id": {"type": "string"}},
            "additionalProperties": false
        }))
        .unwrap();
        let r = record("a.json", json!({"id": "a", "badges": ["official"]}));

        let report = validate_record(&strict, &r);

        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "badges");
    }

    #[test]
    fn test_batch_keeps_input_order_and_continues_past_failures() {
        let records = vec![
            record("b.json", json!({"id": "b"})),
            record("a.json", json!({"id": "a", "name": "A"})),
        ];

        let reports = validate_batch(&validator(), &records);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file, "b.json");
        assert!(!reports[0].passed());
        assert!(reports[1].passed());
    }

    #[test]
    fn test_build_strips_authored_badges() {
        let now = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
        let records = vec![record(
            "a.json",
            json!({"id": "a", "name": "A", "badges": ["official"], "_platform_boost": 9}),
        )];

        let out = build_bundle(&records, vec![], &BundleOptions::default(), now);

        assert_eq!(out.warnings.len(), 2);
        let server = &out.bundle.servers[0];
        assert_eq!(server["badges"], json!([]));
        assert!(server.get("_platform_boost").is_none());
    }
}
