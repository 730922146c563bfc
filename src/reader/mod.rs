//! Buffered readers
//!
//! A response body can be read start to finish exactly once. The replay
//! reader pays a single copy so that any number of consumers each get their
//! own full view of the same bytes.

mod replay;

pub use replay::{ReplayHandle, ReplayReader};
