use ripple_core::analyzer::{link_parser, title_parser};
use ripple_core::module::simple_score;
use ripple_core::{
    Analyzer, CrawlError, Data, ErrorKind, Item, ParseOutput, ParseResponse, RawRequest,
    RawResponse, Request, Response,
};
use std::sync::Arc;
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn analyzer(parsers: Vec<ParseResponse>) -> Analyzer {
    Analyzer::new(
        "A1",
        parsers.into_iter().map(Some).collect(),
        Some(simple_score()),
    )
    .unwrap()
}

fn response(body: &'static str, depth: u32) -> Response {
    let raw = RawResponse::new(200)
        .with_request(RawRequest::get(url("https://example.com/")))
        .with_body(body.as_bytes());
    Response::new(raw, depth)
}

/// Emits requests at fixed depths, ignoring the depth it is given
fn fixed_depth_parser(depths: Vec<u32>) -> ParseResponse {
    Arc::new(move |_raw: &mut RawResponse, _depth: u32| -> ParseOutput {
        let data = depths
            .iter()
            .enumerate()
            .map(|(i, depth)| {
                let link = url(&format!("https://example.com/{}", i));
                Data::Request(Request::new(RawRequest::get(link), *depth))
            })
            .collect();
        (data, Vec::new())
    })
}

fn length_parser() -> ParseResponse {
    Arc::new(|raw: &mut RawResponse, _depth: u32| -> ParseOutput {
        let body = raw.read_body_to_string().unwrap();
        (
            vec![Data::Item(Item::new().with_field("length", body.len()))],
            Vec::new(),
        )
    })
}

fn failing_parser(message: &'static str) -> ParseResponse {
    Arc::new(move |_raw: &mut RawResponse, _depth: u32| -> ParseOutput {
        (Vec::new(), vec![CrawlError::analyzer(message)])
    })
}

#[test]
fn test_requests_sit_one_hop_below_response() {
    let analyzer = analyzer(vec![fixed_depth_parser(vec![0, 3, 4, 9])]);
    let (data, errors) = analyzer.analyze(Some(response("", 3)));

    assert!(errors.is_empty());
    assert_eq!(data.len(), 4);
    for datum in &data {
        assert_eq!(datum.as_request().unwrap().depth(), 4);
    }
}

#[test]
fn test_two_parsers_read_the_full_body() {
    let analyzer = analyzer(vec![length_parser(), length_parser()]);
    let (data, errors) = analyzer.analyze(Some(response("hello", 0)));

    assert!(errors.is_empty());
    let lengths: Vec<_> = data
        .iter()
        .map(|d| d.as_item().unwrap().get("length").unwrap().as_u64().unwrap())
        .collect();
    assert_eq!(lengths, vec![5, 5]);
}

#[test]
fn test_all_parsers_run_after_errors() {
    let analyzer = analyzer(vec![
        failing_parser("first"),
        length_parser(),
        failing_parser("third"),
    ]);
    let (data, errors) = analyzer.analyze(Some(response("abc", 0)));

    assert_eq!(data.len(), 1);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].to_string().ends_with("first"));
    assert!(errors[1].to_string().ends_with("third"));

    let counts = analyzer.base().counts();
    assert_eq!(counts.called, 1);
    assert_eq!(counts.accepted, 1);
    assert_eq!(counts.completed, 0);
}

#[test]
fn test_output_keeps_parser_order() {
    let analyzer = analyzer(vec![length_parser(), fixed_depth_parser(vec![0, 0])]);
    let (data, _) = analyzer.analyze(Some(response("xy", 1)));

    assert!(data[0].is_item());
    assert_eq!(
        data[1].as_request().unwrap().url().unwrap().as_str(),
        "https://example.com/0"
    );
    assert_eq!(
        data[2].as_request().unwrap().url().unwrap().as_str(),
        "https://example.com/1"
    );
}

#[test]
fn test_successful_call_counts_completed() {
    let analyzer = analyzer(vec![length_parser()]);
    analyzer.analyze(Some(response("a", 0)));
    analyzer.analyze(Some(response("b", 0)));

    let summary = analyzer.summary();
    assert_eq!(summary.counts.called, 2);
    assert_eq!(summary.counts.accepted, 2);
    assert_eq!(summary.counts.completed, 2);
    assert_eq!(summary.counts.handling, 0);
    assert_eq!(summary.score, 2 + 4 + 8);
}

fn assert_rejected(analyzer: &Analyzer, response: Option<Response>, message: &str) {
    let (data, errors) = analyzer.analyze(response);
    assert!(data.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_parameter());
    assert_eq!(errors[0].kind(), ErrorKind::Analyzer);
    assert!(
        errors[0].to_string().ends_with(message),
        "unexpected error: {}",
        errors[0]
    );
}

#[test]
fn test_invalid_responses_are_rejected() {
    let analyzer = analyzer(vec![length_parser()]);

    assert_rejected(&analyzer, None, "nil response");
    assert_rejected(
        &analyzer,
        Some(Response::from_parts(None, 0)),
        "nil HTTP response",
    );
    assert_rejected(
        &analyzer,
        Some(Response::new(RawResponse::new(200), 0)),
        "nil HTTP request",
    );
    assert_rejected(
        &analyzer,
        Some(Response::new(
            RawResponse::new(200).with_request(RawRequest::new("GET", None)),
            0,
        )),
        "nil HTTP request URL",
    );

    let counts = analyzer.base().counts();
    assert_eq!(counts.called, 4);
    assert_eq!(counts.accepted, 0);
    assert_eq!(counts.completed, 0);
    assert_eq!(counts.handling, 0);
}

#[test]
fn test_built_in_parsers_share_one_body() {
    let html = r#"<html><head><title>Index</title></head><body>
        <a href="/a">A</a>
        <a href="https://other.com/b">B</a>
    </body></html>"#;
    let raw = RawResponse::new(200)
        .with_request(RawRequest::get(url("https://example.com/docs/")))
        .with_header("Content-Type", "text/html")
        .with_body(html.as_bytes());

    let analyzer = analyzer(vec![link_parser(), title_parser()]);
    let (data, errors) = analyzer.analyze(Some(Response::new(raw, 2)));

    assert!(errors.is_empty());
    assert_eq!(data.len(), 3);

    let requests: Vec<_> = data.iter().filter_map(Data::as_request).collect();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.depth() == 3));
    assert_eq!(requests[0].url().unwrap().as_str(), "https://example.com/a");

    let item = data.iter().find_map(Data::as_item).unwrap();
    assert_eq!(item.get("title").unwrap(), "Index");
    assert_eq!(item.get("depth").unwrap(), 2);
}
