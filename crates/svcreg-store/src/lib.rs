//! svcreg Store - filesystem collaborators for the registry toolchain
//!
//! Everything that reads from or writes to a registry checkout lives here:
//! record discovery and loading, the category and schema stores, the
//! `registry.toml` layout config, and the atomic bundle writer.

#![allow(clippy::result_large_err)]

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod loader;
pub mod schema_doc;
pub mod writer;

pub use catalog::load_categories;
pub use config::{load_config, RegistryConfig, RegistryLayout};
pub use discovery::list_record_files;
pub use loader::{load_record, load_records, LoadOutcome};
pub use schema_doc::load_schema_document;
pub use writer::{read_bundle_digest, write_bundle};
