//! Semantic bundle digest
//!
//! SHA-256 over the bundle with wall-clock fields removed, so two builds over
//! the same inputs produce the same digest.

use super::Bundle;
use crate::errors::Result;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Compute the semantic digest of a bundle
///
/// Excludes `generated_at` and every server's `timestamps`.
///
/// # Errors
///
/// Returns `Serialization` if the bundle cannot be encoded.
pub fn semantic_digest(bundle: &Bundle) -> Result<String> {
    let value = serde_json::to_value(bundle)?;
    semantic_digest_value(value)
}

/// Compute the semantic digest of an already-parsed bundle document
///
/// # Errors
///
/// Returns `Serialization` if the document cannot be re-encoded.
pub fn semantic_digest_value(mut value: Value) -> Result<String> {
    if let Some(obj) = value.as_object_mut() {
        obj.remove("generated_at");
        if let Some(Value::Array(servers)) = obj.get_mut("servers") {
            for server in servers.iter_mut() {
                if let Some(server) = server.as_object_mut() {
                    server.remove("timestamps");
                }
            }
        }
    }

    let canonical = serde_json::to_string(&value)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{assemble_bundle, BundleOptions};
    use crate::enrich::enrich_record_at;
    use crate::model::Record;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn build_at(hour: u32, name: &str) -> Bundle {
        let at = Utc.with_ymd_and_hms(2026, 5, 1, hour, 0, 0).unwrap();
        let record = Record::from_value("a.json", json!({"id": "a", "name": name})).unwrap();
        assemble_bundle(
            vec![enrich_record_at(&record, at)],
            vec![],
            &BundleOptions::default(),
            at,
        )
    }

    #[test]
    fn test_digest_ignores_wall_clock_fields() {
        let morning = semantic_digest(&build_at(8, "Alpha")).unwrap();
        let evening = semantic_digest(&build_at(20, "Alpha")).unwrap();
        assert_eq!(morning, evening);
        assert_eq!(morning.len(), 64);
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = semantic_digest(&build_at(8, "Alpha")).unwrap();
        let b = semantic_digest(&build_at(8, "Beta")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_matches_after_json_round_trip() {
        let bundle = build_at(8, "Alpha");
        let reparsed: Value = serde_json::from_str(&bundle.to_pretty_json().unwrap()).unwrap();
        assert_eq!(
            semantic_digest(&bundle).unwrap(),
            semantic_digest_value(reparsed).unwrap()
        );
    }
}
