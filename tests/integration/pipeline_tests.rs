use ripple_core::module::simple_score;
use ripple_core::pipeline::{fingerprint, require_fields, timestamp};
use ripple_core::{CrawlError, ErrorKind, Item, Pipeline, ProcessItem};
use std::sync::{Arc, Mutex};

/// Records every item each step receives
#[derive(Default)]
struct Trace {
    seen: Mutex<Vec<(usize, Item)>>,
}

impl Trace {
    fn seen_by(&self, step: usize) -> Vec<Item> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == step)
            .map(|(_, item)| item.clone())
            .collect()
    }
}

fn step(trace: &Arc<Trace>, index: usize, fail: bool) -> ProcessItem {
    let trace = Arc::clone(trace);
    Arc::new(move |item: &Item| -> (Option<Item>, Option<CrawlError>) {
        trace.seen.lock().unwrap().push((index, item.clone()));
        let next = item.with_field(format!("step{}", index), true);
        let error = fail.then(|| CrawlError::pipeline(format!("step {} failed", index)));
        (Some(next), error)
    })
}

fn three_steps(trace: &Arc<Trace>) -> Pipeline {
    Pipeline::new(
        "P1",
        vec![
            Some(step(trace, 1, false)),
            Some(step(trace, 2, true)),
            Some(step(trace, 3, false)),
        ],
        Some(simple_score()),
    )
    .unwrap()
}

#[test]
fn test_fail_fast_stops_and_drops_result() {
    let trace = Arc::new(Trace::default());
    let pipeline = three_steps(&trace);
    pipeline.set_fail_fast(true);

    let errors = pipeline.send(Some(Item::new()));

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().ends_with("step 2 failed"));
    assert_eq!(trace.seen_by(1).len(), 1);
    assert_eq!(trace.seen_by(2).len(), 1);
    assert!(trace.seen_by(3).is_empty());

    let counts = pipeline.base().counts();
    assert_eq!(counts.accepted, 1);
    assert_eq!(counts.completed, 0);
}

#[test]
fn test_collect_all_forwards_failing_result() {
    let trace = Arc::new(Trace::default());
    let pipeline = three_steps(&trace);

    let errors = pipeline.send(Some(Item::new()));

    assert_eq!(errors.len(), 1);
    let third = trace.seen_by(3);
    assert_eq!(third.len(), 1);
    assert!(third[0].contains("step1"));
    assert!(third[0].contains("step2"));
}

#[test]
fn test_every_step_sees_previous_result() {
    let trace = Arc::new(Trace::default());
    let pipeline = Pipeline::new(
        "P1",
        vec![Some(step(&trace, 1, false)), Some(step(&trace, 2, false))],
        Some(simple_score()),
    )
    .unwrap();

    assert!(pipeline.send(Some(Item::new().with_field("id", 7))).is_empty());

    let second = trace.seen_by(2);
    assert_eq!(second[0].get("id").unwrap(), 7);
    assert!(second[0].contains("step1"));
    assert_eq!(pipeline.base().completed_count(), 1);
}

#[test]
fn test_missing_item() {
    let trace = Arc::new(Trace::default());
    let pipeline = three_steps(&trace);

    let errors = pipeline.send(None);

    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_parameter());
    assert_eq!(errors[0].kind(), ErrorKind::Pipeline);
    assert!(errors[0].to_string().ends_with("nil item"));
    assert!(trace.seen.lock().unwrap().is_empty());

    let counts = pipeline.base().counts();
    assert_eq!(counts.called, 1);
    assert_eq!(counts.accepted, 0);
    assert_eq!(counts.completed, 0);
    assert_eq!(counts.handling, 0);
}

#[test]
fn test_toggling_fail_fast_between_calls() {
    let trace = Arc::new(Trace::default());
    let pipeline = three_steps(&trace);

    pipeline.set_fail_fast(true);
    pipeline.send(Some(Item::new()));
    pipeline.set_fail_fast(false);
    pipeline.send(Some(Item::new()));

    assert_eq!(trace.seen_by(3).len(), 1);
    assert!(!pipeline.summary().fail_fast);
}

#[test]
fn test_built_in_processors() {
    let pipeline = Pipeline::new(
        "P1",
        vec![
            Some(require_fields(vec!["title".to_string()])),
            Some(fingerprint()),
            Some(timestamp()),
        ],
        Some(simple_score()),
    )
    .unwrap();
    pipeline.set_fail_fast(true);

    assert!(pipeline
        .send(Some(Item::new().with_field("title", "Home")))
        .is_empty());

    let errors = pipeline.send(Some(Item::new().with_field("url", "https://example.com/")));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("missing fields: title"));

    let summary = pipeline.summary();
    assert_eq!(summary.module.counts.called, 2);
    assert_eq!(summary.module.counts.completed, 1);
    assert_eq!(summary.processor_number, 3);
}
