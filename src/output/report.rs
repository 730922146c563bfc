use crate::analyzer::Analyzer;
use crate::data::{Data, Item, RawRequest, RawResponse, Response};
use crate::module::ModuleSummary;
use crate::pipeline::{ItemSink, Pipeline, PipelineSummary};
use crate::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use url::Url;

/// A request discovered on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestEntry {
    /// Absolute URL of the request
    pub url: Option<String>,

    /// Crawl depth the request was placed at
    pub depth: u32,
}

/// Error messages grouped by the stage that reported them
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportErrors {
    pub analyzer: Vec<String>,
    pub pipeline: Vec<String>,
}

/// Stage summaries taken after the run
#[derive(Debug, Clone, Serialize)]
pub struct StageSummaries {
    pub analyzer: ModuleSummary,
    pub pipeline: PipelineSummary,
}

/// Outcome of running both stages over one page
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageReport {
    /// Requests found by the analyzer, in output order
    pub requests: Vec<RequestEntry>,

    /// Items as they left the pipeline
    pub items: Vec<Item>,

    pub errors: ReportErrors,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StageSummaries>,
}

impl PageReport {
    /// Attaches the current summaries of both stages
    pub fn with_summaries(mut self, analyzer: &Analyzer, pipeline: &Pipeline) -> Self {
        self.summary = Some(StageSummaries {
            analyzer: analyzer.summary(),
            pipeline: pipeline.summary(),
        });
        self
    }

    /// Renders the report as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `RippleError::Json` if an item can't be serialized.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Opens a saved HTML page as a response to a `GET` for `url`
///
/// # Arguments
///
/// * `path` - The saved page; its contents become the response body
/// * `url` - The URL the page was fetched from
/// * `depth` - The crawl depth of that request
///
/// # Returns
///
/// * `Ok(Response)` - A `200 text/html` response whose body streams the file
/// * `Err(RippleError)` - The URL didn't parse or the file couldn't be opened
pub fn open_page(path: &Path, url: &str, depth: u32) -> Result<Response> {
    let url = Url::parse(url)?;
    let body = File::open(path)?;

    let raw = RawResponse::new(200)
        .with_request(RawRequest::get(url))
        .with_header("Content-Type", "text/html")
        .with_body(body);

    Ok(Response::new(raw, depth))
}

/// Runs `analyzer` over `response` and sends every item through `pipeline`
///
/// # Arguments
///
/// * `analyzer` - The analyzer stage
/// * `pipeline` - A pipeline whose last processor belongs to `sink`
/// * `sink` - Collects the items that reach the end of the pipeline
/// * `response` - The response to analyze
///
/// # Returns
///
/// A report of the discovered requests, the processed items and every
/// error. An item stopped by a fail-fast pipeline never reaches the sink,
/// so only its error is reported.
pub fn process_page(
    analyzer: &Analyzer,
    pipeline: &Pipeline,
    sink: &ItemSink,
    response: Response,
) -> PageReport {
    let mut report = PageReport::default();

    let (data, analyze_errors) = analyzer.analyze(Some(response));
    report.errors.analyzer = analyze_errors.iter().map(ToString::to_string).collect();

    for datum in data {
        match datum {
            Data::Request(request) => report.requests.push(RequestEntry {
                url: request.url().map(|url| url.to_string()),
                depth: request.depth(),
            }),
            Data::Item(item) => {
                let errors = pipeline.send(Some(item));
                report
                    .errors
                    .pipeline
                    .extend(errors.iter().map(ToString::to_string));
            }
        }
    }

    report.items = sink.drain();

    tracing::info!(
        "Found {} requests and {} items ({} analyzer errors, {} pipeline errors)",
        report.requests.len(),
        report.items.len(),
        report.errors.analyzer.len(),
        report.errors.pipeline.len()
    );

    report
}
