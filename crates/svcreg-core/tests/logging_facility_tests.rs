#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use svcreg_core::errors::RegistryError;
use svcreg_core::logging_facility::test_capture::init_test_capture;
use svcreg_core::{detect_conflicts, log_op_end, log_op_error, log_op_start, sanitize, Record};
use svcreg_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert!(found >= 1, "Should have captured a start event");
}

#[test]
fn test_log_op_end_macro_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1);
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RegistryError::Parse {
        file: "servers/bad.json".to_string(),
        message: "EOF while parsing".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event captured");
    assert_eq!(error_event.fields.get("err_code"), Some(&"ERR_PARSE".to_string()));
    assert_eq!(error_event.file.as_deref(), Some("servers/bad.json"));
}

#[test]
fn test_log_op_error_without_file_leaves_it_empty() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = RegistryError::InvalidInput {
        reason: "no records".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 1, record_count = 0);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("error event captured");
    assert_eq!(error_event.file.as_deref(), Some(""));
    assert_eq!(error_event.fields.get("record_count"), Some(&"0".to_string()));
    assert_eq!(error_event.fields.get("err_code"), Some(&"ERR_INVALID_INPUT".to_string()));
}

#[test]
fn test_conflict_detection_logs_start_and_end() {
    let capture = init_test_capture();
    let records = vec![Record::from_value("servers/a.json", json!({"id": "a"})).unwrap()];

    detect_conflicts(&records);

    capture.assert_event_exists("detect_conflicts", EVENT_START);
    capture.assert_event_exists("detect_conflicts", EVENT_END);
}

#[test]
fn test_sanitizer_warns_per_removed_field() {
    let capture = init_test_capture();
    let file = "servers/logging-unique-sanitize.json";
    let r = Record::from_value(file, json!({"id": "x", "stats": 1, "featured": true})).unwrap();

    sanitize(&r);

    let removed: Vec<String> = capture
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN && e.file.as_deref() == Some(file))
        .filter_map(|e| e.field)
        .collect();
    assert_eq!(removed, vec!["featured".to_string(), "stats".to_string()]);
}

#[test]
fn test_conflicts_log_the_colliding_record_id() {
    let capture = init_test_capture();
    let records = vec![
        Record::from_value("servers/logging-one.json", json!({"id": "logging-dup"})).unwrap(),
        Record::from_value("servers/logging-two.json", json!({"id": "logging-dup"})).unwrap(),
    ];

    detect_conflicts(&records);

    let hits = capture.count_events(|e| {
        e.record_id.as_deref() == Some("logging-dup")
            && e.file.as_deref() == Some("servers/logging-two.json")
    });
    assert_eq!(hits, 1);
}
