//! Structured log output of the click controller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dfn_panel::{MemoryDocument, NodeId, PanelController, Rect};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F>(f: F) -> Capture
where
    F: FnOnce(),
{
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn document() -> (MemoryDocument, NodeId, NodeId) {
    let mut doc = MemoryDocument::new(1000.0);
    let body = doc.body();
    let known = doc.append_element(body, "DFN");
    doc.set_id(known, "known");
    doc.add_class(known, "dfn-paneled");
    doc.set_rect(known, Rect::new(200.0, 100.0, 250.0, 118.0));
    let unknown = doc.append_element(body, "DFN");
    doc.set_id(unknown, "unknown");
    doc.add_class(unknown, "dfn-paneled");
    let panel = doc.append_element(body, "ASIDE");
    doc.add_class(panel, "dfn-panel");
    doc.set_attr(panel, "data-for", "known");
    doc.set_rect(panel, Rect::from_origin_size(0.0, 0.0, 150.0, 80.0));
    (doc, known, unknown)
}

#[test]
fn click_emits_span_with_classification() {
    let (mut doc, known, _) = document();
    let capture = with_captured_tracing(|| {
        PanelController::default().handle_click(&mut doc, &known);
    });

    let spans = capture.spans();
    let click = spans
        .iter()
        .find(|s| s.name == "dfn_panel.click")
        .expect("expected dfn_panel.click span");
    assert_eq!(click.fields.get("click").map(String::as_str), Some("term"));
    assert_eq!(click.fields.get("hit_link").map(String::as_str), Some("false"));
}

#[test]
fn opening_logs_placement_at_debug() {
    let (mut doc, known, _) = document();
    let capture = with_captured_tracing(|| {
        PanelController::default().handle_click(&mut doc, &known);
    });

    let events = capture.events();
    let opened = events
        .iter()
        .find(|e| e.fields.get("message").map(String::as_str) == Some("panel opened"))
        .expect("expected panel opened event");
    assert_eq!(opened.level, tracing::Level::DEBUG);
    assert_eq!(opened.fields.get("side").map(String::as_str), Some("right"));
    assert_eq!(opened.fields.get("left").map(String::as_str), Some("255"));
}

#[test]
fn missing_panel_warns_with_term_id() {
    let (mut doc, _, unknown) = document();
    let capture = with_captured_tracing(|| {
        PanelController::default().handle_click(&mut doc, &unknown);
    });

    let events = capture.events();
    let warn = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("expected a warn event");
    assert_eq!(warn.fields.get("term_id").map(String::as_str), Some("unknown"));
}
