//! Error handling for svcreg-store
//!
//! Wraps svcreg-core ExError with store-specific helpers

use std::path::Path;
use svcreg_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// A record file that could not be read or parsed
pub fn parse_error(path: &Path, message: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Parse)
        .with_op("load_record")
        .with_file(path.display().to_string())
        .with_message(message.to_string())
}

/// A run-level store (categories, schema, config, records dir) that could not be loaded
pub fn store_load_error(store: &str, path: &Path, message: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::StoreLoad)
        .with_op(format!("load_{}", store))
        .with_file(path.display().to_string())
        .with_message(message.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_file(path.display().to_string())
        .with_message(err.to_string())
}
