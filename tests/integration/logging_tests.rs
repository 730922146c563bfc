use ripple_core::module::simple_score;
use ripple_core::{
    Analyzer, CrawlError, Item, ParseOutput, ParseResponse, Pipeline, ProcessItem, RawRequest,
    RawResponse, Response,
};
use std::sync::{Arc, Mutex};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;
use url::Url;

/// Records the name of the span each event was emitted in
#[derive(Clone, Default)]
struct EventSpans(Arc<Mutex<Vec<Option<String>>>>);

impl<S> Layer<S> for EventSpans
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let name = ctx.event_span(event).map(|span| span.name().to_string());
        self.0.lock().unwrap().push(name);
    }
}

impl EventSpans {
    fn names(&self) -> Vec<Option<String>> {
        self.0.lock().unwrap().clone()
    }
}

#[test]
fn test_analyzer_logs_under_given_span() {
    let spans = EventSpans::default();
    let subscriber = tracing_subscriber::registry().with(spans.clone());

    tracing::subscriber::with_default(subscriber, || {
        let noop: ParseResponse =
            Arc::new(|_raw: &mut RawResponse, _depth: u32| -> ParseOutput { (Vec::new(), Vec::new()) });
        let analyzer = Analyzer::new("A1", vec![Some(noop)], Some(simple_score()))
            .unwrap()
            .with_span(tracing::info_span!("dispatch"));

        let raw = RawResponse::new(200)
            .with_request(RawRequest::get(Url::parse("https://example.com/").unwrap()));
        analyzer.analyze(Some(Response::new(raw, 0)));
        analyzer.analyze(None);
    });

    let names = spans.names();
    assert!(!names.is_empty());
    assert!(names.iter().all(|name| name.as_deref() == Some("dispatch")));
}

#[test]
fn test_pipeline_logs_under_given_span() {
    let spans = EventSpans::default();
    let subscriber = tracing_subscriber::registry().with(spans.clone());

    tracing::subscriber::with_default(subscriber, || {
        let keep: ProcessItem =
            Arc::new(|_item: &Item| -> (Option<Item>, Option<CrawlError>) { (None, None) });
        let pipeline = Pipeline::new("P1", vec![Some(keep)], Some(simple_score()))
            .unwrap()
            .with_span(tracing::info_span!("items"));

        pipeline.send(Some(Item::new()));
        pipeline.send(None);
    });

    let names = spans.names();
    assert!(!names.is_empty());
    assert!(names.iter().all(|name| name.as_deref() == Some("items")));
}

#[test]
fn test_default_span_is_named_after_stage() {
    let spans = EventSpans::default();
    let subscriber = tracing_subscriber::registry().with(spans.clone());

    tracing::subscriber::with_default(subscriber, || {
        let keep: ProcessItem =
            Arc::new(|_item: &Item| -> (Option<Item>, Option<CrawlError>) { (None, None) });
        let pipeline = Pipeline::new("P1", vec![Some(keep)], Some(simple_score())).unwrap();
        pipeline.send(None);
    });

    assert_eq!(spans.names(), vec![Some("pipeline".to_string())]);
}
