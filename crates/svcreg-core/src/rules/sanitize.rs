//! Platform-field sanitization
//!
//! Contributors may not author fields owned by the registry maintainers.
//! Those fields are stripped before validation and enrichment, with one
//! warning per removed field.

use crate::model::Record;
use std::fmt;

/// Top-level fields reserved for the registry maintainers
pub const RESERVED_FIELDS: &[&str] = &["badges", "stats", "sponsored", "featured"];

/// Any top-level field starting with this prefix is reserved
pub const RESERVED_PREFIX: &str = "_platform";

/// A platform-managed field removed from an authored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeWarning {
    pub file: String,
    pub field: String,
}

impl fmt::Display for SanitizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: removed platform-managed field '{}'",
            self.file, self.field
        )
    }
}

/// Outcome of sanitizing one record
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    pub record: Record,
    pub warnings: Vec<SanitizeWarning>,
}

/// Whether a top-level field name is platform-managed
pub fn is_platform_field(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name) || name.starts_with(RESERVED_PREFIX)
}

/// Strip platform-managed fields from a record
///
/// Removal is unconditional. Warnings are ordered by field name so output
/// is stable across runs.
pub fn sanitize(record: &Record) -> Sanitized {
    let mut cleaned = record.clone();
    let mut removed: Vec<String> = record
        .body()
        .keys()
        .filter(|k| is_platform_field(k))
        .cloned()
        .collect();
    removed.sort();

    let mut warnings = Vec::with_capacity(removed.len());
    for field in removed {
        cleaned.body_mut().remove(&field);
        tracing::warn!(
            file = record.file(),
            field = field.as_str(),
            "removed platform-managed field"
        );
        warnings.push(SanitizeWarning {
            file: record.file().to_string(),
            field,
        });
    }

    Sanitized {
        record: cleaned,
        warnings,
    }
}
