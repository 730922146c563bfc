use crate::data::RawRequest;
use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

/// Single-consume response body
pub type Body = Box<dyn Read + Send>;

/// Transport-level response as produced by the downloader
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,

    /// Header name/value pairs in receive order
    pub headers: Vec<(String, String)>,

    /// The request that produced this response
    pub request: Option<Arc<RawRequest>>,

    body: Option<Body>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            request: None,
            body: None,
        }
    }

    pub fn with_request(mut self, request: impl Into<Arc<RawRequest>>) -> Self {
        self.request = Some(request.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body<R: Read + Send + 'static>(mut self, body: R) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// Returns the first header value matching `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Removes the body, leaving the response without one
    pub fn take_body(&mut self) -> Option<Body> {
        self.body.take()
    }

    /// Replaces the body with `body`
    pub fn set_body<R: Read + Send + 'static>(&mut self, body: R) {
        self.body = Some(Box::new(body));
    }

    /// Reads whatever is left of the body into a string
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD. A missing body
    /// reads as empty.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the body can't be read.
    pub fn read_body_to_string(&mut self) -> io::Result<String> {
        let mut bytes = Vec::new();
        if let Some(body) = self.body.as_mut() {
            body.read_to_end(&mut bytes)?;
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("request", &self.request)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// A fetched response together with the crawl depth of its request
#[derive(Debug)]
pub struct Response {
    raw: Option<RawResponse>,
    depth: u32,
}

impl Response {
    pub fn new(raw: RawResponse, depth: u32) -> Self {
        Self {
            raw: Some(raw),
            depth,
        }
    }

    /// Builds a response whose raw part may be missing
    pub fn from_parts(raw: Option<RawResponse>, depth: u32) -> Self {
        Self { raw, depth }
    }

    pub fn raw(&self) -> Option<&RawResponse> {
        self.raw.as_ref()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn into_raw(self) -> Option<RawResponse> {
        self.raw
    }
}
