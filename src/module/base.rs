//! Counter set and summary shared by analyzers and pipelines

use crate::module::{CalculateScore, ModuleId};
use crate::ParameterError;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time values of a stage's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Every invocation attempt
    pub called: u64,

    /// Invocations whose input passed validation
    pub accepted: u64,

    /// Invocations that finished without errors
    pub completed: u64,

    /// Invocations currently executing
    pub handling: u64,
}

/// Immutable snapshot of a stage: identifier, counters and derived score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub id: ModuleId,

    #[serde(flatten)]
    pub counts: Counts,

    pub score: u64,
}

/// Instrumented base embedded by every stage
///
/// All counter updates are atomic, so a single instance can be shared
/// between any number of worker threads. Snapshots are not linearizable
/// with respect to concurrent updates.
pub struct ModuleBase {
    id: ModuleId,
    called: AtomicU64,
    accepted: AtomicU64,
    completed: AtomicU64,
    handling: AtomicU64,
    calculate_score: CalculateScore,
}

impl ModuleBase {
    /// Creates a base with zeroed counters
    ///
    /// # Errors
    ///
    /// Returns a `ParameterError` if no score calculator is given.
    pub fn new(
        id: impl Into<ModuleId>,
        calculate_score: Option<CalculateScore>,
    ) -> Result<Self, ParameterError> {
        let calculate_score =
            calculate_score.ok_or_else(|| ParameterError::new("nil score calculator"))?;

        Ok(Self {
            id: id.into(),
            called: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            handling: AtomicU64::new(0),
            calculate_score,
        })
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn incr_called(&self) {
        self.called.fetch_add(1, Ordering::SeqCst);
    }

    pub fn incr_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn incr_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn incr_handling(&self) {
        self.handling.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrements the in-flight gauge, never going below zero
    pub fn decr_handling(&self) {
        let _ = self
            .handling
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Marks one invocation in flight until the returned guard is dropped
    pub fn handling_guard(&self) -> HandlingGuard<'_> {
        self.incr_handling();
        HandlingGuard { base: self }
    }

    pub fn called_count(&self) -> u64 {
        self.called.load(Ordering::SeqCst)
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn completed_count(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn handling_number(&self) -> u64 {
        self.handling.load(Ordering::SeqCst)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            called: self.called_count(),
            accepted: self.accepted_count(),
            completed: self.completed_count(),
            handling: self.handling_number(),
        }
    }

    /// Resets the monotonic counters; the in-flight gauge is left alone
    pub fn clear(&self) {
        self.called.store(0, Ordering::SeqCst);
        self.accepted.store(0, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
    }

    pub fn score(&self) -> u64 {
        (self.calculate_score)(&self.counts())
    }

    pub fn score_calculator(&self) -> CalculateScore {
        self.calculate_score.clone()
    }

    /// Takes a snapshot of the module's state
    ///
    /// # Returns
    ///
    /// The id, the current counters and the score computed from them. The
    /// counters are read one at a time, so a snapshot taken under load may
    /// mix values from neighbouring calls.
    pub fn summary(&self) -> ModuleSummary {
        let counts = self.counts();
        ModuleSummary {
            id: self.id.clone(),
            counts,
            score: (self.calculate_score)(&counts),
        }
    }
}

impl fmt::Debug for ModuleBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleBase")
            .field("id", &self.id)
            .field("counts", &self.counts())
            .finish_non_exhaustive()
    }
}

/// Keeps the in-flight gauge raised for the lifetime of one invocation
#[must_use = "the in-flight gauge drops back as soon as the guard is dropped"]
pub struct HandlingGuard<'a> {
    base: &'a ModuleBase,
}

impl Drop for HandlingGuard<'_> {
    fn drop(&mut self) {
        self.base.decr_handling();
    }
}
