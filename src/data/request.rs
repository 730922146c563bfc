use std::sync::Arc;
use url::Url;

/// Transport-level request as produced by the downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    /// HTTP method (e.g., "GET")
    pub method: String,

    /// Target URL, if the request carries one
    pub url: Option<Url>,

    /// Header name/value pairs in send order
    pub headers: Vec<(String, String)>,
}

impl RawRequest {
    pub fn new(method: impl Into<String>, url: Option<Url>) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Vec::new(),
        }
    }

    /// Shorthand for a `GET` request to `url`
    pub fn get(url: Url) -> Self {
        Self::new("GET", Some(url))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first header value matching `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A crawl request: a raw request plus its hop count from the seed
///
/// Requests are immutable. Changing the depth yields a new value that
/// shares the same raw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    raw: Arc<RawRequest>,
    depth: u32,
}

impl Request {
    pub fn new(raw: impl Into<Arc<RawRequest>>, depth: u32) -> Self {
        Self {
            raw: raw.into(),
            depth,
        }
    }

    pub fn raw(&self) -> &Arc<RawRequest> {
        &self.raw
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn url(&self) -> Option<&Url> {
        self.raw.url.as_ref()
    }

    /// Returns a new request for the same raw request at `depth`
    pub fn with_depth(&self, depth: u32) -> Self {
        Self {
            raw: Arc::clone(&self.raw),
            depth,
        }
    }
}
