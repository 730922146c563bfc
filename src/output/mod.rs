//! Output module for single-page runs
//!
//! This module handles:
//! - Turning a saved page into a response the analyzer accepts
//! - Running the analyzer and pipeline over it
//! - Rendering the outcome as a JSON report

mod report;

pub use report::{open_page, process_page, PageReport, ReportErrors, RequestEntry, StageSummaries};
