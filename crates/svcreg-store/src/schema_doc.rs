//! Schema document loader

use crate::errors::{store_load_error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read the record schema document as JSON
///
/// # Errors
///
/// Returns `StoreLoad` if the file is missing or is not valid JSON.
pub fn load_schema_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| store_load_error("schema", path, e))?;
    serde_json::from_str(&content).map_err(|e| store_load_error("schema", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.schema.json");
        fs::write(&path, r#"{"type": "object", "required": ["id"]}"#).unwrap();

        let schema = load_schema_document(&path).unwrap();
        assert_eq!(schema["required"][0], "id");
    }

    #[test]
    fn test_invalid_schema_json_is_store_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.schema.json");
        fs::write(&path, "{ type: object").unwrap();

        let err = load_schema_document(&path).unwrap_err();
        assert_eq!(err.op(), Some("load_schema"));
    }
}
