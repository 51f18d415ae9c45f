use thiserror::Error;

/// Result type alias using RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// test assertions and structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Per-record
    /// Record file unreadable or malformed
    Parse,
    /// One or more field-level schema defects
    SchemaViolation,
    /// Cross-record uniqueness violation
    Conflict,

    // Run-level
    /// Category store, schema document or layout config missing or unparseable
    StoreLoad,
    InvalidInput,
    /// An on-disk bundle no longer matches the record set
    StaleBundle,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::SchemaViolation => "ERR_SCHEMA_VIOLATION",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::StoreLoad => "ERR_STORE_LOAD",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::StaleBundle => "ERR_STALE_BUNDLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional operation and file context.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    file: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            file: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file reference context
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(file) = &self.file {
            write!(f, " (file: {})", file)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for registry operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A record file could not be read or parsed
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// A run-level store (categories, schema, config) could not be loaded
    #[error("Failed to load {store} from {path}: {message}")]
    StoreLoad {
        store: String,
        path: String,
        message: String,
    },

    /// The schema document does not compile
    #[error("Schema failed to compile: {message}")]
    SchemaCompile { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },

    /// The bundle on disk does not match a fresh build
    #[error("Bundle at {path} is stale (expected digest {expected}, found {found})")]
    StaleBundle {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl From<RegistryError> for ExError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Parse { file, message } => ExError::new(ExErrorKind::Parse)
                .with_op("load_record")
                .with_file(file)
                .with_message(message),

            RegistryError::StoreLoad {
                store,
                path,
                message,
            } => ExError::new(ExErrorKind::StoreLoad)
                .with_op(format!("load_{}", store))
                .with_file(path)
                .with_message(message),

            RegistryError::SchemaCompile { message } => ExError::new(ExErrorKind::StoreLoad)
                .with_op("compile_schema")
                .with_message(message),

            RegistryError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            RegistryError::Io { op, path, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_file(path)
                .with_message(message),

            RegistryError::StaleBundle {
                path,
                expected,
                found,
            } => ExError::new(ExErrorKind::StaleBundle)
                .with_op("check_bundle")
                .with_file(path)
                .with_message(format!("expected digest {}, found {}", expected, found)),

            RegistryError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }
        }
    }
}

/// Conversion from serde_json::Error to RegistryError
impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::Parse,
            ExErrorKind::SchemaViolation,
            ExErrorKind::Conflict,
            ExErrorKind::StoreLoad,
            ExErrorKind::InvalidInput,
            ExErrorKind::StaleBundle,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_code_op_and_file() {
        let err = ExError::new(ExErrorKind::Parse)
            .with_op("load_record")
            .with_file("servers/a.json")
            .with_message("expected value at line 1 column 1");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_PARSE]"));
        assert!(rendered.contains("load_record"));
        assert!(rendered.contains("servers/a.json"));
    }

    #[test]
    fn test_schema_compile_maps_to_store_load() {
        let ex: ExError = RegistryError::SchemaCompile {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::StoreLoad);
        assert_eq!(ex.op(), Some("compile_schema"));
    }
}
