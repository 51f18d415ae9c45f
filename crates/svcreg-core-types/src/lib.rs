//! Core types shared across svcreg facilities
//!
//! Holds the canonical field keys and event names used by the logging
//! facility and by anything that inspects captured log events.

pub mod schema;
