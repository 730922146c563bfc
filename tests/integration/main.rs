//! Integration tests for the crawl processing stages
//!
//! These drive the analyzer and pipeline through the public API the way an
//! external dispatcher would.

mod analyzer_tests;
mod logging_tests;
mod pipeline_tests;
