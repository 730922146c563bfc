//! Data carried between crawl stages
//!
//! # Components
//!
//! - `RawRequest` / `RawResponse`: the transport-level values handed over by
//!   the downloader
//! - `Request`: a raw request plus its crawl depth
//! - `Response`: a raw response plus the depth of the request behind it
//! - `Item`: an extracted record
//! - `Data`: either a newly discovered `Request` or an `Item`

mod item;
mod request;
mod response;

pub use item::Item;
pub use request::{RawRequest, Request};
pub use response::{Body, RawResponse, Response};

/// One datum extracted from a response
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// A new crawl target
    Request(Request),

    /// An extracted record
    Item(Item),
}

impl Data {
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Self::Request(request) => Some(request),
            Self::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Request(_) => None,
        }
    }
}

impl From<Request> for Data {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}

impl From<Item> for Data {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}
