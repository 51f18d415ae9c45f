//! Registry layout configuration
//!
//! Reads `registry.toml` from the registry root. Every key is optional:
//!
//! ```toml
//! [layout]
//! records_dir = "servers"
//! schema_path = "schemas/server.schema.json"
//! categories_path = "categories.json"
//! output_path = "dist/bundle.json"
//!
//! [bundle]
//! items_per_page = 24
//! ```

use crate::errors::{store_load_error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use svcreg_core::BundleOptions;

pub const CONFIG_FILE_NAME: &str = "registry.toml";

/// Input and output locations, relative to the registry root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryLayout {
    pub records_dir: PathBuf,
    pub schema_path: PathBuf,
    pub categories_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for RegistryLayout {
    fn default() -> Self {
        Self {
            records_dir: PathBuf::from("servers"),
            schema_path: PathBuf::from("schemas/server.schema.json"),
            categories_path: PathBuf::from("categories.json"),
            output_path: PathBuf::from("dist/bundle.json"),
        }
    }
}

impl RegistryLayout {
    /// Resolve every path against `root`; absolute paths are kept as-is
    pub fn resolve(&self, root: &Path) -> RegistryLayout {
        RegistryLayout {
            records_dir: root.join(&self.records_dir),
            schema_path: root.join(&self.schema_path),
            categories_path: root.join(&self.categories_path),
            output_path: root.join(&self.output_path),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub layout: RegistryLayout,
    pub bundle: BundleOptions,
}

/// Load the registry config
///
/// With `explicit` set, that file must exist. Otherwise `registry.toml` under
/// `root` is read if present, and defaults are used if not. The returned
/// layout is resolved against `root`.
///
/// # Errors
///
/// Returns `StoreLoad` if the file exists but cannot be read or parsed, or
/// if an explicit config file is missing.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<RegistryConfig> {
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => {
            tracing::debug!(
                "No {} found at {}, using defaults",
                CONFIG_FILE_NAME,
                config_path.display()
            );
            return Ok(with_resolved_layout(RegistryConfig::default(), root));
        }
        Err(err) => return Err(store_load_error("config", &config_path, err)),
    };

    let config: RegistryConfig =
        toml::from_str(&content).map_err(|e| store_load_error("config", &config_path, e))?;
    Ok(with_resolved_layout(config, root))
}

fn with_resolved_layout(config: RegistryConfig, root: &Path) -> RegistryConfig {
    RegistryConfig {
        layout: config.layout.resolve(root),
        bundle: config.bundle,
    }
}
