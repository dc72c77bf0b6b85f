//! Core trait definitions for the simulation pipeline.
//!
//! These four traits are the seams of one episode:
//!
//! - `ClaimSampler`: the claimant (draws a citation at random)
//! - `TrustScorer`: the verifier (deterministic, pure)
//! - `AcceptanceGate`: the consumer (thresholds the score)
//! - `AuditWriter`: the audit trail (records every run step)
//!
//! The runner wires them together in this order. Randomness enters only
//! through the `RngCore` handed to `ClaimSampler::sample`.

use std::sync::Arc;

use rand::RngCore;

use ancestor_contracts::{
    audit::AuditStep,
    citation::{CitationRecord, ScoreBreakdown},
    error::AncestorResult,
};

/// A scorer that maps a citation to a bounded trust score.
///
/// Implementations must be deterministic and side-effect free: the same
/// record always produces the same breakdown, and no hidden state is read.
pub trait TrustScorer: Send + Sync {
    /// Score `citation` and explain how the score was reached.
    ///
    /// `ScoreBreakdown::score` must lie in [0, 100].
    fn assess(&self, citation: &CitationRecord) -> ScoreBreakdown;

    /// The final trust score for `citation`.
    fn score(&self, citation: &CitationRecord) -> f64 {
        self.assess(citation).score
    }
}

/// The claimant: draws one citation from a fixed dataset.
pub trait ClaimSampler: Send + Sync {
    /// Draw one record uniformly at random, with replacement across calls.
    ///
    /// All randomness must come from `rng` so that a fixed seed reproduces
    /// the same sequence of draws. Returns `EmptyDataset` if `dataset` is
    /// empty.
    fn sample(
        &self,
        dataset: &[CitationRecord],
        rng: &mut dyn RngCore,
    ) -> AncestorResult<CitationRecord>;
}

/// The consumer: turns a score into an accept/reject decision.
pub trait AcceptanceGate: Send + Sync {
    /// The score at or above which claims are accepted.
    fn threshold(&self) -> f64;

    /// Return true iff `score >= self.threshold()`.
    fn accept(&self, score: f64) -> bool {
        crate::gate::accept(score, self.threshold())
    }
}

/// The audit trail: an append-only record of numbered run steps.
///
/// A failed write is fatal for the run; callers propagate
/// `AncestorError::AuditWriteFailed`.
pub trait AuditWriter: Send + Sync {
    /// Append one step and return it with its assigned step number.
    fn record(&self, message: &str) -> AncestorResult<AuditStep>;

    /// Mark the run as complete. Implementations may seal or flush here.
    fn finalize(&self) -> AncestorResult<()>;
}

impl<T: AuditWriter + ?Sized> AuditWriter for Arc<T> {
    fn record(&self, message: &str) -> AncestorResult<AuditStep> {
        (**self).record(message)
    }

    fn finalize(&self) -> AncestorResult<()> {
        (**self).finalize()
    }
}
