//! Score calculators
//!
//! A score is a single number derived from a counter snapshot. The engine
//! uses it to pick between stage instances; the formula is configuration.

use crate::module::Counts;
use serde::Deserialize;
use std::sync::Arc;

/// Derives a score from a counter snapshot
pub type CalculateScore = Arc<dyn Fn(&Counts) -> u64 + Send + Sync>;

/// Per-counter multipliers for [`weighted_score`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScoreWeights {
    #[serde(rename = "called-weight", default)]
    pub called: u64,

    #[serde(rename = "accepted-weight", default)]
    pub accepted: u64,

    #[serde(rename = "completed-weight", default)]
    pub completed: u64,

    #[serde(rename = "handling-weight", default)]
    pub handling: u64,
}

impl ScoreWeights {
    pub fn is_zero(&self) -> bool {
        self.called == 0 && self.accepted == 0 && self.completed == 0 && self.handling == 0
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            called: 1,
            accepted: 2,
            completed: 4,
            handling: 16,
        }
    }
}

/// The default calculator: `called + 2*accepted + 4*completed + 16*handling`
pub fn simple_score() -> CalculateScore {
    weighted_score(ScoreWeights::default())
}

/// Builds a calculator that sums each counter times its weight
///
/// Arithmetic saturates at `u64::MAX`.
pub fn weighted_score(weights: ScoreWeights) -> CalculateScore {
    Arc::new(move |counts: &Counts| {
        counts
            .called
            .saturating_mul(weights.called)
            .saturating_add(counts.accepted.saturating_mul(weights.accepted))
            .saturating_add(counts.completed.saturating_mul(weights.completed))
            .saturating_add(counts.handling.saturating_mul(weights.handling))
    })
}
