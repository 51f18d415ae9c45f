//! svcreg Core - validation and bundling kernel for the service registry
//!
//! This crate holds the pure part of the registry toolchain:
//! - Record and category models over loaded JSON values
//! - Platform-field sanitization ahead of validation
//! - JSON Schema validation with full violation collection
//! - Cross-record conflict detection for ids and aliases
//! - Enrichment of derived fields (badges, hosting type, timestamps)
//! - Deterministic bundle assembly and semantic digests
//!
//! Nothing in here touches the filesystem; see `svcreg-store` for loading.

pub mod bundle;
pub mod enrich;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod pipeline;
pub mod rules;
pub mod schema;

// Re-export commonly used types
pub use bundle::{assemble_bundle, Bundle, BundleOptions};
pub use enrich::{enrich_record, enrich_record_at, EnrichedRecord};
pub use errors::{ExError, ExErrorKind, RegistryError, Result};
pub use model::{Category, Conflict, ConflictKind, Record, Violation};
pub use pipeline::{build_bundle, validate_batch, BuildOutput, FileReport};
pub use rules::conflicts::detect_conflicts;
pub use rules::sanitize::{sanitize, Sanitized, SanitizeWarning};
pub use schema::{SchemaValidator, ValidationReport};
