//! Schema validation of sanitized records
//!
//! The schema document is compiled once per run and applied to every record.
//! All violations of a record are collected in a single pass.
//!
//! ## Draft handling
//!
//! The declared `$schema` draft is honoured when the validator knows it
//! (drafts 4, 6, 7, 2019-09, 2020-12). An unrecognised `$schema` URI is the
//! only thing ever removed from the document; the schema is then compiled as
//! draft 2020-12. Structural keywords are never rewritten.

use crate::errors::{RegistryError, Result};
use crate::model::{Record, Violation};
use jsonschema::{Draft, Validator};
use serde_json::Value;

const SCHEMA_KEYWORD: &str = "$schema";

/// Validation outcome for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub file: String,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Compiled record schema
pub struct SchemaValidator {
    validator: Validator,
    draft: Draft,
    stripped_metadata: bool,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("draft", &self.draft)
            .field("stripped_metadata", &self.stripped_metadata)
            .finish()
    }
}

impl SchemaValidator {
    /// Compile a schema document
    ///
    /// # Errors
    ///
    /// Returns `SchemaCompile` if the document is not a valid schema.
    pub fn compile(schema: &Value) -> Result<Self> {
        let declared = schema.get(SCHEMA_KEYWORD).and_then(Value::as_str);

        let (document, draft, stripped_metadata) = match declared {
            None => (schema.clone(), Draft::Draft202012, false),
            Some(uri) => match draft_for_uri(uri) {
                Some(draft) => (schema.clone(), draft, false),
                None => {
                    tracing::warn!(
                        declared = uri,
                        "unrecognised $schema draft; compiling as draft 2020-12"
                    );
                    let mut stripped = schema.clone();
                    if let Some(obj) = stripped.as_object_mut() {
                        obj.remove(SCHEMA_KEYWORD);
                    }
                    (stripped, Draft::Draft202012, true)
                }
            },
        };

        let validator = jsonschema::options()
            .with_draft(draft)
            .build(&document)
            .map_err(|e| RegistryError::SchemaCompile {
                message: e.to_string(),
            })?;

        Ok(Self {
            validator,
            draft,
            stripped_metadata,
        })
    }

    /// Draft the schema was compiled under
    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// Whether an unrecognised `$schema` declaration was removed before compiling
    pub fn stripped_metadata(&self) -> bool {
        self.stripped_metadata
    }

    /// Validate one record, collecting every violation
    pub fn validate(&self, record: &Record) -> ValidationReport {
        let instance = record.to_value();
        let violations = self
            .validator
            .iter_errors(&instance)
            .map(|err| {
                let path = err.instance_path.to_string();
                Violation {
                    file: record.file().to_string(),
                    path: if path.is_empty() { "/".to_string() } else { path },
                    message: err.to_string(),
                }
            })
            .collect();

        ValidationReport {
            file: record.file().to_string(),
            violations,
        }
    }
}

/// Map a `$schema` URI to a supported draft
fn draft_for_uri(uri: &str) -> Option<Draft> {
    let normalized = uri
        .trim()
        .trim_end_matches('#')
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    match normalized {
        "json-schema.org/draft-04/schema" => Some(Draft::Draft4),
        "json-schema.org/draft-06/schema" => Some(Draft::Draft6),
        "json-schema.org/draft-07/schema" => Some(Draft::Draft7),
        "json-schema.org/draft/2019-09/schema" => Some(Draft::Draft201909),
        "json-schema.org/draft/2020-12/schema" => Some(Draft::Draft202012),
        _ => None,
    }
}
