//! Instrumented module base shared by every crawl stage
//!
//! Each stage embeds a [`ModuleBase`] holding its identifier, its call
//! counters and the scoring function used to rank stage instances.
//!
//! # Components
//!
//! - `ModuleId`: opaque identifier of a stage instance
//! - `ModuleBase`: atomic counters plus the score calculator
//! - `HandlingGuard`: scoped bracket around one invocation
//! - `simple_score` / `weighted_score`: ready-made score calculators

mod base;
mod id;
mod score;

pub use base::{Counts, HandlingGuard, ModuleBase, ModuleSummary};
pub use id::ModuleId;
pub use score::{simple_score, weighted_score, CalculateScore, ScoreWeights};
