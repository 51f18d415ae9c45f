//! Record rules: per-record sanitization and set-wide conflict detection

pub mod conflicts;
pub mod sanitize;
