use serde_json::{json, Value};
use svcreg_core::Record;

/// Build a record from a JSON literal
///
/// Panics on non-object values; test fixtures are always objects.
#[allow(dead_code)]
pub fn record(file: &str, value: Value) -> Record {
    Record::from_value(file, value).expect("record fixture must be a JSON object")
}

/// Minimal record with an id and optional alias
#[allow(dead_code)]
pub fn id_record(file: &str, id: &str, alias: Option<&str>) -> Record {
    let mut value = json!({ "id": id, "name": id });
    if let Some(alias) = alias {
        value["alias"] = json!(alias);
    }
    record(file, value)
}

/// Record with publisher flags and a transport type
#[allow(dead_code)]
pub fn server(file: &str, id: &str, name: &str, official: bool, verified: bool) -> Record {
    record(
        file,
        json!({
            "id": id,
            "name": name,
            "publisher": { "official": official, "verified": verified },
            "transport": { "type": "stdio", "command": "npx", "args": ["-y", id] }
        }),
    )
}
