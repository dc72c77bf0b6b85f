//! The episode runner: drives N independent sample → score → gate trials.
//!
//! The runner enforces the simulation's ordering model:
//!
//!   Audit(start) → Sample × N → [Score → Gate] × N → Audit(complete)
//!
//! Every random draw happens up front, sequentially and in episode order,
//! before any scoring. Scoring and gating are pure, so the result sequence
//! depends only on the dataset and the state of the random source.

use rand::RngCore;
use tracing::{debug, info};

use ancestor_contracts::{
    citation::{CitationRecord, ScoreResult},
    error::{AncestorError, AncestorResult},
};

use crate::traits::{AcceptanceGate, AuditWriter, ClaimSampler, TrustScorer};

/// The orchestrator for one simulation run.
///
/// The runner owns the four collaborators and enforces the pipeline
/// ordering on every call to `run()`.
pub struct EpisodeRunner {
    sampler: Box<dyn ClaimSampler>,
    scorer: Box<dyn TrustScorer>,
    gate: Box<dyn AcceptanceGate>,
    audit: Box<dyn AuditWriter>,
}

impl EpisodeRunner {
    /// Create a runner from its collaborators.
    pub fn new(
        sampler: Box<dyn ClaimSampler>,
        scorer: Box<dyn TrustScorer>,
        gate: Box<dyn AcceptanceGate>,
        audit: Box<dyn AuditWriter>,
    ) -> Self {
        Self { sampler, scorer, gate, audit }
    }

    /// Run `episodes` trials against `dataset`, drawing from `rng`.
    ///
    /// # Pipeline
    ///
    /// 1. Fail fast with `EmptyDataset` if there is nothing to sample
    /// 2. Audit the start of the run
    /// 3. Draw one claim per episode, in episode order
    /// 4. Score and gate each claim, tagging it with its 1-based episode
    /// 5. Audit the completion of the run
    ///
    /// Zero episodes yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an empty dataset, sampler failures, and audit
    /// write failures. A rejected claim is not an error.
    pub fn run(
        &self,
        dataset: &[CitationRecord],
        episodes: u32,
        rng: &mut dyn RngCore,
    ) -> AncestorResult<Vec<ScoreResult>> {
        if dataset.is_empty() {
            return Err(AncestorError::EmptyDataset {
                source_name: "in-memory dataset".to_string(),
            });
        }

        self.audit.record(&format!(
            "Starting {episodes}-episode simulation with Claimant, Verifier, and Consumer agents"
        ))?;

        // ── Draw phase: the only consumer of the random source ───────────────
        let mut claims = Vec::with_capacity(episodes as usize);
        for _ in 0..episodes {
            claims.push(self.sampler.sample(dataset, rng)?);
        }

        // ── Score phase: pure, order-preserving ──────────────────────────────
        let results: Vec<ScoreResult> = claims
            .into_iter()
            .zip(1u32..)
            .map(|(citation, episode)| self.run_episode(episode, citation))
            .collect();

        let accepted = results.iter().filter(|r| r.accepted).count();
        info!(episodes, accepted, "simulation run complete");

        self.audit.record(&format!(
            "Completed {episodes} episodes with trust scoring and decision logging"
        ))?;

        Ok(results)
    }

    /// Score and gate one already-drawn claim.
    pub fn run_episode(&self, episode: u32, citation: CitationRecord) -> ScoreResult {
        let breakdown = self.scorer.assess(&citation);
        let accepted = self.gate.accept(breakdown.score);

        debug!(
            episode,
            domain = %citation.domain,
            score = breakdown.score,
            accepted,
            "episode scored"
        );

        ScoreResult {
            episode,
            citation,
            score: breakdown.score,
            accepted,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
