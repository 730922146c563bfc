//! Built-in HTML response parsers
//!
//! - `links`: every followable link on the page, as new requests
//! - `title`: one item holding the page URL, depth and title
//!
//! # Link Extraction Rules
//!
//! **Include:**
//! - `<a href="...">` tags
//! - `<link rel="canonical" href="...">`
//!
//! **Exclude:**
//! - `<a href="..." download>`
//! - `javascript:`, `mailto:`, `tel:` links
//! - Data URIs and fragment-only links
//! - Anything that does not resolve to HTTP(S)
//!
//! Requests are emitted at the response's own depth; the analyzer moves
//! them one hop down.

use crate::analyzer::{ParseOutput, ParseResponse};
use crate::data::{Data, Item, RawRequest, RawResponse, Request};
use crate::CrawlError;
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

/// Looks up a built-in parser by its configuration name
pub fn parser_by_name(name: &str) -> Option<ParseResponse> {
    match name {
        "links" => Some(link_parser()),
        "title" => Some(title_parser()),
        _ => None,
    }
}

/// Emits a `GET` request for every followable link in an HTML body
pub fn link_parser() -> ParseResponse {
    Arc::new(|raw: &mut RawResponse, depth: u32| -> ParseOutput {
        let (document, base_url) = match load_html(raw) {
            Ok(Some(loaded)) => loaded,
            Ok(None) => return (Vec::new(), Vec::new()),
            Err(e) => return (Vec::new(), vec![e]),
        };

        let data = extract_links(&document, &base_url)
            .into_iter()
            .map(|link| Data::Request(Request::new(RawRequest::get(link), depth)))
            .collect();

        (data, Vec::new())
    })
}

/// Emits one item with the page URL, depth, status and title
///
/// A page without a usable `<title>` is reported as an error.
pub fn title_parser() -> ParseResponse {
    Arc::new(|raw: &mut RawResponse, depth: u32| -> ParseOutput {
        let status = raw.status;
        let (document, base_url) = match load_html(raw) {
            Ok(Some(loaded)) => loaded,
            Ok(None) => return (Vec::new(), Vec::new()),
            Err(e) => return (Vec::new(), vec![e]),
        };

        match extract_title(&document) {
            Some(title) => {
                let item = Item::new()
                    .with_field("url", base_url.as_str())
                    .with_field("depth", depth)
                    .with_field("status", status)
                    .with_field("title", title);
                (vec![Data::Item(item)], Vec::new())
            }
            None => (
                Vec::new(),
                vec![CrawlError::analyzer(format!("no title found in {}", base_url))],
            ),
        }
    })
}

/// Reads and parses the body if the response carries HTML
///
/// Returns `Ok(None)` for responses whose Content-Type says they are not
/// HTML. A missing Content-Type header is treated as HTML.
fn load_html(raw: &mut RawResponse) -> Result<Option<(Html, Url)>, CrawlError> {
    if let Some(content_type) = raw.header("content-type") {
        if !content_type.to_ascii_lowercase().contains("html") {
            return Ok(None);
        }
    }

    let base_url = raw
        .request
        .as_ref()
        .and_then(|request| request.url.clone())
        .ok_or_else(|| CrawlError::analyzer("response has no request URL"))?;

    let body = raw
        .read_body_to_string()
        .map_err(|e| CrawlError::analyzer(format!("failed to read body of {}: {}", base_url, e)))?;

    Ok(Some((Html::parse_document(&body), base_url)))
}

fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(link) = element.value().attr("href").and_then(|h| resolve(h, base_url)) {
                links.push(link);
            }
        }
    }

    if let Ok(canonical_selector) = Selector::parse("link[rel='canonical'][href]") {
        for element in document.select(&canonical_selector) {
            if let Some(link) = element.value().attr("href").and_then(|h| resolve(h, base_url)) {
                links.push(link);
            }
        }
    }

    links
}

/// Resolves an href against the page URL, dropping links that can't be crawled
fn resolve(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];
    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
}
