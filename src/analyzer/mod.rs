//! Response analyzer stage
//!
//! This module turns one fetched response into extracted data:
//! - Runs every configured response parser over the full body
//! - Normalizes the depth of newly discovered requests
//! - Collects data and errors from all parsers
//!
//! Built-in HTML parsers live in [`parsers`].

mod analyze;
pub mod parsers;

pub use analyze::{Analyzer, ParseOutput, ParseResponse};
pub use parsers::{link_parser, parser_by_name, title_parser};
