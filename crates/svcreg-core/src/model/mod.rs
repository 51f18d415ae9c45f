//! Registry data model
//!
//! - `Record`: one authored service definition over its JSON body
//! - `Category`: reference metadata from the category store
//! - `Violation` / `Conflict`: per-run findings, never persisted

pub mod category;
pub mod finding;
pub mod record;

pub use category::Category;
pub use finding::{Conflict, ConflictKind, Violation};
pub use record::{Publisher, Record, TransportKind};
