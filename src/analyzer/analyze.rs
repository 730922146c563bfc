use crate::data::{Data, RawResponse, Response};
use crate::module::{CalculateScore, ModuleBase, ModuleId, ModuleSummary};
use crate::reader::ReplayReader;
use crate::{CrawlError, ErrorKind};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn, Span};

/// Data and errors produced by one parser over one response
pub type ParseOutput = (Vec<Data>, Vec<CrawlError>);

/// Parses a response found at the given depth
///
/// The body handed to the parser is always a fresh, full view.
pub type ParseResponse = Arc<dyn Fn(&mut RawResponse, u32) -> ParseOutput + Send + Sync>;

/// Runs an ordered list of response parsers over each response
///
/// Every parser runs regardless of errors reported by the ones before it.
/// Requests found in the output always sit one hop below the response.
pub struct Analyzer {
    base: ModuleBase,
    parsers: Vec<ParseResponse>,
    span: Span,
}

impl Analyzer {
    /// Creates an analyzer from an ordered parser list
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier reported in summaries and logs
    /// * `parsers` - Parsers in the order they run; no entry may be missing
    /// * `calculate_score` - Turns the counters into a load score
    ///
    /// # Errors
    ///
    /// Returns a parameter error if the score calculator is missing, the
    /// list is empty, or any entry is missing (the message names its index).
    pub fn new(
        id: impl Into<ModuleId>,
        parsers: Vec<Option<ParseResponse>>,
        calculate_score: Option<CalculateScore>,
    ) -> Result<Self, CrawlError> {
        let base = ModuleBase::new(id, calculate_score).map_err(|source| {
            CrawlError::Parameter {
                kind: ErrorKind::Analyzer,
                source,
            }
        })?;

        if parsers.is_empty() {
            return Err(parameter_error("empty response parser list"));
        }

        let mut inner = Vec::with_capacity(parsers.len());
        for (idx, parser) in parsers.into_iter().enumerate() {
            match parser {
                Some(parser) => inner.push(parser),
                None => return Err(parameter_error(format!("nil response parser[{}]", idx))),
            }
        }

        let span = tracing::info_span!("analyzer", id = %base.id());
        Ok(Self {
            base,
            parsers: inner,
            span,
        })
    }

    /// Replaces the span the analyzer logs under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn id(&self) -> &ModuleId {
        self.base.id()
    }

    pub fn base(&self) -> &ModuleBase {
        &self.base
    }

    /// Returns a copy of the configured parser list
    pub fn parsers(&self) -> Vec<ParseResponse> {
        self.parsers.clone()
    }

    pub fn summary(&self) -> ModuleSummary {
        self.base.summary()
    }

    /// Extracts data from one response
    ///
    /// # Returns
    ///
    /// Every parser's data followed by every parser's errors, both in
    /// parser order.
    ///
    /// A missing response, raw response, originating request or request URL
    /// yields a single parameter error and no data. Failing to buffer the
    /// body yields a single analyzer error.
    pub fn analyze(&self, response: Option<Response>) -> (Vec<Data>, Vec<CrawlError>) {
        let _entered = self.span.enter();
        let _handling = self.base.handling_guard();
        self.base.incr_called();

        // Validate response
        let Some(response) = response else {
            return rejected("nil response");
        };
        let depth = response.depth();
        let Some(mut raw) = response.into_raw() else {
            return rejected("nil HTTP response");
        };
        let url = match raw.request.as_ref() {
            None => return rejected("nil HTTP request"),
            Some(request) => match request.url.as_ref() {
                None => return rejected("nil HTTP request URL"),
                Some(url) => url.clone(),
            },
        };

        self.base.incr_accepted();
        info!("Parse the response (URL: {}, depth: {})", url, depth);

        // Buffer body
        let replay = match ReplayReader::new(raw.take_body()) {
            Ok(replay) => replay,
            Err(e) => {
                warn!("Failed to buffer response body for {}: {}", url, e);
                return (Vec::new(), vec![CrawlError::analyzer(e.to_string())]);
            }
        };

        // Run parsers
        let mut data = Vec::new();
        let mut errors = Vec::new();
        for (idx, parser) in self.parsers.iter().enumerate() {
            raw.set_body(replay.reader());
            let (parsed, parse_errors) = parser(&mut raw, depth);

            debug!(
                "Parser {} of {} returned {} data and {} errors",
                idx + 1,
                self.parsers.len(),
                parsed.len(),
                parse_errors.len()
            );

            data.extend(parsed.into_iter().map(|datum| child_depth(datum, depth)));
            errors.extend(parse_errors);
        }

        if errors.is_empty() {
            self.base.incr_completed();
        }

        (data, errors)
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("base", &self.base)
            .field("parsers", &self.parsers.len())
            .finish()
    }
}

/// Places a discovered request one hop below the response it came from
fn child_depth(datum: Data, response_depth: u32) -> Data {
    match datum {
        Data::Request(request) => {
            let depth = response_depth.saturating_add(1);
            if request.depth() == depth {
                Data::Request(request)
            } else {
                Data::Request(request.with_depth(depth))
            }
        }
        Data::Item(item) => Data::Item(item),
    }
}

fn parameter_error(message: impl Into<String>) -> CrawlError {
    CrawlError::parameter(ErrorKind::Analyzer, message)
}

fn rejected(message: &str) -> (Vec<Data>, Vec<CrawlError>) {
    warn!("Rejected response: {}", message);
    (Vec::new(), vec![parameter_error(message)])
}
