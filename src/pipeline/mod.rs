//! Item pipeline stage
//!
//! Moves one extracted item through an ordered chain of processors.
//! Built-in processors live in [`processors`].

mod chain;
pub mod processors;

pub use chain::{Pipeline, PipelineSummary, ProcessItem};
pub use processors::{fingerprint, processor_by_name, require_fields, timestamp, ItemSink};
