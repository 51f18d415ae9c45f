//! Derived-field enrichment
//!
//! Computes the fields contributors never author: trust badges, hosting
//! classification and timestamps. The input record is never mutated.

use crate::model::{Record, TransportKind};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BADGE_OFFICIAL: &str = "official";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostingType {
    Local,
    Remote,
}

/// Both fields carry the same enrichment instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: String,
    pub updated_at: String,
}

/// A record plus its derived fields
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: Record,
    pub badges: Vec<String>,
    pub hosting_type: HostingType,
    pub timestamps: Timestamps,
}

impl EnrichedRecord {
    /// Flatten into the record body with derived fields set
    pub fn to_json(&self) -> Map<String, Value> {
        let mut body = self.record.body().clone();
        body.insert(
            "badges".to_string(),
            Value::Array(self.badges.iter().cloned().map(Value::String).collect()),
        );
        body.insert(
            "hosting_type".to_string(),
            Value::String(hosting_label(self.hosting_type).to_string()),
        );
        let mut timestamps = Map::new();
        timestamps.insert(
            "created_at".to_string(),
            Value::String(self.timestamps.created_at.clone()),
        );
        timestamps.insert(
            "updated_at".to_string(),
            Value::String(self.timestamps.updated_at.clone()),
        );
        body.insert("timestamps".to_string(), Value::Object(timestamps));
        body
    }
}

fn hosting_label(hosting: HostingType) -> &'static str {
    match hosting {
        HostingType::Local => "local",
        HostingType::Remote => "remote",
    }
}

/// Badges earned from publisher flags
pub fn compute_badges(record: &Record) -> Vec<String> {
    if record.publisher().official {
        vec![BADGE_OFFICIAL.to_string()]
    } else {
        Vec::new()
    }
}

/// `remote` for HTTP transports, `local` for everything else
pub fn classify_hosting(record: &Record) -> HostingType {
    match record.transport_kind() {
        TransportKind::Http => HostingType::Remote,
        TransportKind::Stdio | TransportKind::Unknown => HostingType::Local,
    }
}

/// Enrich a record, stamping timestamps with the current time
pub fn enrich_record(record: &Record) -> EnrichedRecord {
    enrich_record_at(record, Utc::now())
}

/// Enrich a record with a caller-supplied instant
///
/// `created_at` and `updated_at` are both set to `now`; first-seen time is
/// not carried across runs.
pub fn enrich_record_at(record: &Record, now: DateTime<Utc>) -> EnrichedRecord {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    EnrichedRecord {
        record: record.clone(),
        badges: compute_badges(record),
        hosting_type: classify_hosting(record),
        timestamps: Timestamps {
            created_at: stamp.clone(),
            updated_at: stamp,
        },
    }
}
