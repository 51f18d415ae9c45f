//! Record file discovery

use crate::errors::{store_load_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions recognised as record files
pub const RECORD_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RECORD_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// List record files directly inside `dir`, sorted by path
///
/// Subdirectories are not descended into. The sorted order is the processing
/// order for every downstream stage.
///
/// # Errors
///
/// Returns `StoreLoad` if the directory is missing or unreadable, or if any
/// entry in it cannot be read. A partial listing is never returned.
pub fn list_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| store_load_error("records", dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| store_load_error("records", dir, e))?.path();
        if path.is_file() && is_record_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered record files");
    Ok(files)
}
