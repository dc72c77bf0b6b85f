//! The Ancestor heuristic: a `TrustScorer` driven by a `RuleTable`.
//!
//! Evaluation algorithm:
//!
//! 1. Start at `base_score`.
//! 2. Subtract `age_penalty_per_day * age_days`.
//! 3. Iterate rules in declaration order.  Skip a rule whose group has
//!    already been claimed.  When a rule matches, subtract its penalty and
//!    claim its group.
//! 4. Clamp to [0, 100].

use std::path::Path;

use tracing::debug;

use ancestor_contracts::{
    citation::{AppliedPenalty, CitationRecord, ScoreBreakdown},
    error::AncestorResult,
};
use ancestor_core::traits::TrustScorer;

use crate::rule::{RuleTable, Subject};
use crate::variant::Variant;

/// A deterministic `TrustScorer` backed by a validated rule table.
///
/// ```rust,ignore
/// use ancestor_policy::{RuleTableScorer, Variant};
///
/// let scorer = RuleTableScorer::for_variant(Variant::Baseline)?;
/// let score = scorer.score(&citation);
/// ```
#[derive(Debug, Clone)]
pub struct RuleTableScorer {
    table: RuleTable,
}

impl RuleTableScorer {
    /// Validate `table` and build a scorer from it.
    ///
    /// Returns `AncestorError::ConfigError` if `table` fails validation.
    pub fn new(table: RuleTable) -> AncestorResult<Self> {
        table.validate()?;
        Ok(Self { table: table.normalized() })
    }

    /// Build a scorer for one of the named variants.
    pub fn for_variant(variant: Variant) -> AncestorResult<Self> {
        Self::new(variant.table())
    }

    /// Build a scorer from a rule-table TOML document.
    pub fn from_toml_str(s: &str) -> AncestorResult<Self> {
        Self::new(RuleTable::from_toml_str(s)?)
    }

    /// Build a scorer from a rule-table TOML file.
    pub fn from_file(path: &Path) -> AncestorResult<Self> {
        Self::new(RuleTable::from_file(path)?)
    }

    /// The (normalized) table this scorer evaluates.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}

impl TrustScorer for RuleTableScorer {
    fn assess(&self, citation: &CitationRecord) -> ScoreBreakdown {
        let subject = Subject::of(citation);
        let base = self.table.base_score;
        let age_penalty = self.table.age_penalty_per_day * f64::from(citation.age_days);

        let mut score = base - age_penalty;
        let mut claimed: Vec<&str> = Vec::new();
        let mut applied = Vec::new();

        for rule in &self.table.rules {
            let group = rule.group.as_deref();
            if group.is_some_and(|g| claimed.contains(&g)) {
                continue;
            }
            if !rule.when.matches(&subject) {
                continue;
            }

            debug!(
                rule_id = %rule.id,
                domain = %citation.domain,
                penalty = rule.penalty,
                "scoring rule matched"
            );

            if let Some(g) = group {
                claimed.push(g);
            }
            score -= rule.penalty;
            applied.push(AppliedPenalty {
                rule_id: rule.id.clone(),
                penalty: rule.penalty,
            });
        }

        ScoreBreakdown {
            base,
            age_penalty,
            applied,
            score: score.clamp(0.0, 100.0),
        }
    }
}
