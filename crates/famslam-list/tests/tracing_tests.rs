#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Verify that committed list mutations are logged with structured fields and
//! that ignored input stays below `info`.
//!
//!   cargo test -p famslam-list --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use famslam_core::event::{PointerEvent, PointerPhase};
use famslam_list::{EVENT_QUEUE_WARN_LEN, Item, ItemId, ListEngine};

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured log event.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor that extracts event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

/// Run a closure with event capture installed.
fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn engine() -> ListEngine {
    ListEngine::new(vec![
        Item::titled("a", "A"),
        Item::titled("b", "B"),
        Item::titled("c", "C"),
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn reorder_logs_indices_at_info() {
    let events = with_captured_events(|| {
        engine().on_reorder_gesture(0, Some(2));
    });
    let reorder = events
        .iter()
        .find(|e| e.message == "list reordered")
        .expect("reorder event logged");
    assert_eq!(reorder.level, tracing::Level::INFO);
    assert_eq!(reorder.fields.get("from").map(String::as_str), Some("0"));
    assert_eq!(reorder.fields.get("to").map(String::as_str), Some("2"));
}

#[test]
fn swipe_delete_logs_id() {
    let events = with_captured_events(|| {
        let mut e = engine();
        let b = ItemId::from("b");
        e.on_row_pointer_event(&b, &PointerEvent::touch(PointerPhase::Down, 300.0, 0.0), 320.0);
        e.on_row_pointer_event(&b, &PointerEvent::touch(PointerPhase::Up, 0.0, 0.0), 320.0);
    });
    let deleted = events
        .iter()
        .find(|e| e.message == "item deleted")
        .expect("delete event logged");
    assert_eq!(deleted.level, tracing::Level::INFO);
    assert_eq!(deleted.fields.get("id").map(String::as_str), Some("b"));
    assert_eq!(deleted.fields.get("index").map(String::as_str), Some("1"));
}

#[test]
fn ignored_input_never_logs_above_debug() {
    let events = with_captured_events(|| {
        let mut e = engine();
        let ghost = ItemId::from("ghost");
        e.on_delete_gesture(&ghost);
        e.on_reorder_gesture(1, Some(1));
        e.on_reorder_gesture(0, None);
        e.on_row_pointer_event(&ghost, &PointerEvent::mouse(PointerPhase::Down, 0.0, 0.0), 100.0);
        e.detail().open(&ghost);
    });
    assert!(!events.is_empty());
    assert!(
        events.iter().all(|e| e.level >= tracing::Level::DEBUG),
        "unexpected event above debug: {events:?}"
    );
}

#[test]
fn duplicate_ids_warn() {
    let events = with_captured_events(|| {
        let _ = ListEngine::new(vec![Item::titled("a", "1"), Item::titled("a", "2")]);
    });
    assert!(
        events
            .iter()
            .any(|e| e.level == tracing::Level::WARN && e.message.contains("duplicate"))
    );
}

#[test]
fn undrained_queue_warns_once_and_keeps_events() {
    let mut e = engine();
    let events = with_captured_events(|| {
        for _ in 0..(EVENT_QUEUE_WARN_LEN + 10) {
            e.on_reorder_gesture(0, Some(1));
        }
    });
    let warnings = events
        .iter()
        .filter(|ev| ev.level == tracing::Level::WARN && ev.message.contains("not being drained"))
        .count();
    assert_eq!(warnings, 1);
    assert_eq!(e.pending_events().len(), EVENT_QUEUE_WARN_LEN + 10);

    e.drain_events();
    assert!(e.pending_events().is_empty());
}
