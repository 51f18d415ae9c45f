//! In-memory event capture for logging assertions
//!
//! Installs a layer that records each event's registry context (operation,
//! event name, file, field, record id) so tests can check what a pipeline
//! stage reported about which record.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use svcreg_core_types::schema::{FIELD_EVENT, FIELD_FIELD, FIELD_FILE, FIELD_OP, FIELD_RECORD_ID};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One captured event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    /// Record file the event is about
    pub file: Option<String>,
    /// Removed platform field, for sanitizer warnings
    pub field: Option<String>,
    pub record_id: Option<String>,
    /// Every other field, rendered as text
    pub fields: HashMap<String, String>,
}

#[derive(Default)]
struct FieldText(HashMap<String, String>);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl CapturedEvent {
    fn from_fields(level: Level, FieldText(mut fields): FieldText) -> Self {
        Self {
            level,
            op: fields.remove(FIELD_OP),
            event: fields.remove(FIELD_EVENT),
            file: fields.remove(FIELD_FILE),
            field: fields.remove(FIELD_FIELD),
            record_id: fields.remove(FIELD_RECORD_ID),
            fields,
        }
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), text);

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Assert that an event exists with the given operation and event name
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let found = self.count_events(|e| {
            e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event)
        });
        assert!(found > 0, "no captured event with op={} event={}", op, event);
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber
///
/// The first call installs it; every call returns the same handle. Tests in
/// one binary share the buffer, so filter on something unique to the test.
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: Arc::clone(&events),
            };
            tracing_subscriber::registry().with(layer).try_init().ok();
            TestCapture { events }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_fields_are_lifted_out() {
        let mut text = FieldText::default();
        for (k, v) in [
            ("op", "load_records"),
            ("file", "servers/a.json"),
            ("record_id", "github"),
            ("failed", "0"),
        ] {
            text.0.insert(k.to_string(), v.to_string());
        }

        let event = CapturedEvent::from_fields(Level::WARN, text);

        assert_eq!(event.op.as_deref(), Some("load_records"));
        assert_eq!(event.file.as_deref(), Some("servers/a.json"));
        assert_eq!(event.record_id.as_deref(), Some("github"));
        assert!(event.field.is_none());
        assert_eq!(event.fields.len(), 1);
        assert_eq!(event.fields.get("failed").map(String::as_str), Some("0"));
    }
}
