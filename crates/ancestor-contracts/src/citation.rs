//! Citation and per-episode result types.
//!
//! These types define the data flowing through the simulation pipeline:
//! the sampler produces a `CitationRecord`, the scorer explains it with a
//! `ScoreBreakdown`, and the runner seals each episode into a `ScoreResult`.

use serde::{Deserialize, Serialize};

/// One citation a claimant can put forward.
///
/// Immutable once sampled. `age_days` is either read from the dataset or
/// synthesized by the sampler, depending on the configured age source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationRecord {
    /// Source category, e.g. "Academic Research" or "Blog".
    pub category: String,
    /// Full URL of the cited source.
    pub url: String,
    /// Host domain of the source, e.g. "stanford.edu".
    pub domain: String,
    /// Age of the source in days.
    pub age_days: u32,
    /// Free-text assessment of the source ("peer reviewed", "known satirical outlet").
    pub trust_description: String,
}

impl CitationRecord {
    /// Build a record from any string-like values.
    pub fn new(
        category: impl Into<String>,
        url: impl Into<String>,
        domain: impl Into<String>,
        age_days: u32,
        trust_description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            url: url.into(),
            domain: domain.into(),
            age_days,
            trust_description: trust_description.into(),
        }
    }

    /// Return a copy of this record with `age_days` replaced.
    pub fn with_age(&self, age_days: u32) -> Self {
        Self {
            age_days,
            ..self.clone()
        }
    }
}

/// A single penalty that contributed to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedPenalty {
    /// The `id` of the rule that matched.
    pub rule_id: String,
    /// Points subtracted. Zero for rules that only claim their group.
    pub penalty: f64,
}

/// How a trust score was reached.
///
/// `score` is the clamped final value and always equals what
/// `TrustScorer::score` returns for the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Starting score before any penalty.
    pub base: f64,
    /// `age_penalty_per_day * age_days`.
    pub age_penalty: f64,
    /// Every rule that matched, in evaluation order.
    pub applied: Vec<AppliedPenalty>,
    /// Final score, clamped to [0, 100].
    pub score: f64,
}

impl ScoreBreakdown {
    /// Sum of all rule penalties (excluding the age penalty).
    pub fn rule_penalty_total(&self) -> f64 {
        self.applied.iter().map(|p| p.penalty).sum()
    }

    /// True if a rule with `rule_id` matched.
    pub fn matched(&self, rule_id: &str) -> bool {
        self.applied.iter().any(|p| p.rule_id == rule_id)
    }
}

/// The sealed outcome of one episode.
///
/// Created exactly once per episode by the runner and never mutated. The
/// score is stored unrounded; reporters round it for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 1-based episode index.
    pub episode: u32,
    /// The citation the claimant put forward.
    pub citation: CitationRecord,
    /// Trust score in [0, 100].
    pub score: f64,
    /// Whether the consumer accepted the claim.
    pub accepted: bool,
}

impl ScoreResult {
    /// The score rounded half away from zero to two decimals.
    pub fn rounded_score(&self) -> f64 {
        round2(self.score)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
