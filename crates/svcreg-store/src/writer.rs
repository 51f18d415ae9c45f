//! Bundle writer
//!
//! The bundle is serialised fully in memory, then written with a
//! temp→rename so a failed build never leaves a partial file behind.

use crate::errors::{io_error, store_load_error, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use svcreg_core::bundle::digest::semantic_digest_value;
use svcreg_core::errors::ExError;
use svcreg_core::Bundle;

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically write bytes to a file, creating parent directories
///
/// # Errors
///
/// Returns `Io` if any filesystem step fails.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target_path);
    fs::write(&temp_path, content).map_err(|e| io_error("write_bundle_temp", &temp_path, e))?;

    if let Err(err) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("rename_bundle_temp", target_path, err));
    }
    Ok(())
}

/// Write the bundle as pretty JSON
///
/// # Errors
///
/// Returns `Serialization` if encoding fails, or `Io` if the write fails.
pub fn write_bundle(path: &Path, bundle: &Bundle) -> Result<()> {
    let json = bundle.to_pretty_json().map_err(ExError::from)?;
    atomic_write(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), servers = bundle.servers.len(), "bundle written");
    Ok(())
}

/// Semantic digest of the bundle already on disk, or `None` if there is none
///
/// # Errors
///
/// Returns `StoreLoad` if the file exists but is unreadable or not JSON.
pub fn read_bundle_digest(path: &Path) -> Result<Option<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(store_load_error("bundle", path, err)),
    };
    let value: Value =
        serde_json::from_str(&content).map_err(|e| store_load_error("bundle", path, e))?;
    let digest = semantic_digest_value(value).map_err(ExError::from)?;
    Ok(Some(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use svcreg_core::bundle::semantic_digest;
    use svcreg_core::{assemble_bundle, BundleOptions};
    use tempfile::TempDir;

    fn empty_bundle() -> Bundle {
        let at = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        assemble_bundle(vec![], vec![], &BundleOptions::default(), at)
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("dist").join("bundle.json");

        atomic_write(&target, b"nested").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"nested");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("bundle.json");

        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();

        let tmp_count = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|s| s.ends_with(".tmp"))
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(tmp_count, 0);
        assert_eq!(fs::read(&target).unwrap(), b"second");
    }

    #[test]
    fn test_written_bundle_digest_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("bundle.json");
        let bundle = empty_bundle();

        write_bundle(&target, &bundle).unwrap();

        let on_disk = read_bundle_digest(&target).unwrap();
        assert_eq!(on_disk, Some(semantic_digest(&bundle).unwrap()));
    }

    #[test]
    fn test_missing_bundle_has_no_digest() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(read_bundle_digest(&temp_dir.path().join("none.json")).unwrap(), None);
    }
}
