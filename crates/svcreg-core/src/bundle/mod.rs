//! Bundle assembly
//!
//! The bundle is the single document the front-end consumes. Everything in
//! it is deterministic for a given record set except `generated_at` and the
//! per-record timestamps.
//!
//! ## Top-level keys (serialization order)
//!
//! - `version`: fixed `BUNDLE_VERSION`
//! - `generated_at`: RFC 3339 UTC
//! - `servers`: enriched records, sorted by name (case-insensitive, stable)
//! - `categories`: full category set in store order
//! - `ui`: filters, sort options, default sort, page size
//! - `home`: featured server ids

pub mod digest;
pub mod ui;

use crate::enrich::EnrichedRecord;
use crate::errors::Result;
use crate::model::Category;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub use digest::semantic_digest;
pub use ui::UiConfig;

pub const BUNDLE_VERSION: &str = "2.0";

/// Maximum number of featured servers on the home view
pub const FEATURED_LIMIT: usize = 6;

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 24;

/// Tunables for bundle assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleOptions {
    pub items_per_page: u32,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeConfig {
    pub featured_server_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub version: String,
    pub generated_at: String,
    pub servers: Vec<Map<String, Value>>,
    pub categories: Vec<Category>,
    pub ui: UiConfig,
    pub home: HomeConfig,
}

impl Bundle {
    /// Pretty-printed JSON with a trailing newline
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// Assemble the bundle from enriched records and the category store
///
/// Records keep their relative order for equal names, so the caller's
/// processing order breaks ties.
pub fn assemble_bundle(
    mut records: Vec<EnrichedRecord>,
    categories: Vec<Category>,
    options: &BundleOptions,
    generated_at: DateTime<Utc>,
) -> Bundle {
    records.sort_by_cached_key(|r| r.record.name().unwrap_or_default().to_lowercase());

    let used: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.record.categories())
        .collect();
    let ui = ui::build_ui(&categories, &used, options.items_per_page);

    let featured_server_ids = featured_ids(&records);
    let servers = records.iter().map(EnrichedRecord::to_json).collect();

    Bundle {
        version: BUNDLE_VERSION.to_string(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        servers,
        categories,
        ui,
        home: HomeConfig {
            featured_server_ids,
        },
    }
}

/// Ids of official and verified records, in the given order, capped at `FEATURED_LIMIT`
pub fn featured_ids(sorted: &[EnrichedRecord]) -> Vec<String> {
    sorted
        .iter()
        .filter(|r| {
            let publisher = r.record.publisher();
            publisher.official && publisher.verified
        })
        .filter_map(|r| r.record.id().map(str::to_string))
        .take(FEATURED_LIMIT)
        .collect()
}
