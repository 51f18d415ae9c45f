//! Category store

use crate::errors::{store_load_error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use svcreg_core::Category;

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryDocument {
    Wrapped { categories: Vec<Category> },
    Bare(Vec<Category>),
}

/// Load the category store, preserving file order
///
/// Accepts either `{"categories": [...]}` or a bare array.
///
/// # Errors
///
/// Returns `StoreLoad` if the file is missing or does not parse.
pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    let content = fs::read_to_string(path).map_err(|e| store_load_error("categories", path, e))?;
    let doc: CategoryDocument =
        serde_json::from_str(&content).map_err(|e| store_load_error("categories", path, e))?;

    Ok(match doc {
        CategoryDocument::Wrapped { categories } => categories,
        CategoryDocument::Bare(categories) => categories,
    })
}
