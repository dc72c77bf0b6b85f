//! Scoring rule types and rule table schema.
//!
//! A `RuleTable` is deserialized from TOML (or built from a named variant)
//! and holds an ordered list of `ScoringRule`s.  Rules are evaluated in
//! declaration order.  Rules sharing a `group` are mutually exclusive: the
//! first one that matches claims the group and the rest are skipped.  Rules
//! without a group are independent and stack.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ancestor_contracts::{
    citation::CitationRecord,
    error::{AncestorError, AncestorResult},
};

/// The condition under which a rule applies.
///
/// Expressed as an internally tagged table in TOML:
/// ```toml
/// when = { kind = "domain-contains", patterns = ["clickbait", "unknown"] }
/// when = { kind = "domain-suffix", suffixes = [".com"], exempt_category = "Academic Research" }
/// ```
///
/// Domain and description comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleMatch {
    /// The domain contains any of `patterns` as a substring.
    DomainContains { patterns: Vec<String> },

    /// The domain contains any of the specifically named `domains`.
    DomainIs { domains: Vec<String> },

    /// The domain ends with any of `suffixes`, unless the citation's
    /// category equals `exempt_category`.
    DomainSuffix {
        suffixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exempt_category: Option<String>,
    },

    /// The trust description contains any of `patterns` as a substring.
    DescriptionContains { patterns: Vec<String> },
}

impl RuleMatch {
    /// Return true if this condition holds for `subject`.
    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        match self {
            RuleMatch::DomainContains { patterns } => {
                patterns.iter().any(|p| subject.domain.contains(p.as_str()))
            }
            RuleMatch::DomainIs { domains } => {
                domains.iter().any(|d| subject.domain.contains(d.as_str()))
            }
            RuleMatch::DomainSuffix { suffixes, exempt_category } => {
                let exempt = exempt_category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(subject.category.trim()));
                !exempt && suffixes.iter().any(|s| subject.domain.ends_with(s.as_str()))
            }
            RuleMatch::DescriptionContains { patterns } => {
                patterns.iter().any(|p| subject.description.contains(p.as_str()))
            }
        }
    }

    fn patterns(&self) -> &[String] {
        match self {
            RuleMatch::DomainContains { patterns } => patterns,
            RuleMatch::DomainIs { domains } => domains,
            RuleMatch::DomainSuffix { suffixes, .. } => suffixes,
            RuleMatch::DescriptionContains { patterns } => patterns,
        }
    }

    fn patterns_mut(&mut self) -> &mut Vec<String> {
        match self {
            RuleMatch::DomainContains { patterns } => patterns,
            RuleMatch::DomainIs { domains } => domains,
            RuleMatch::DomainSuffix { suffixes, .. } => suffixes,
            RuleMatch::DescriptionContains { patterns } => patterns,
        }
    }
}

/// The lower-cased view of a citation that rules are matched against.
#[derive(Debug, Clone)]
pub struct Subject<'a> {
    pub domain: String,
    pub description: String,
    pub category: &'a str,
}

impl<'a> Subject<'a> {
    pub fn of(citation: &'a CitationRecord) -> Self {
        Self {
            domain: citation.domain.to_lowercase(),
            description: citation.trust_description.to_lowercase(),
            category: &citation.category,
        }
    }
}

/// A single scoring rule.
///
/// Example in TOML:
/// ```toml
/// [[rules]]
/// id = "suspicious-domain-keyword"
/// description = "Domain contains a clickbait marker"
/// group = "domain"
/// penalty = 20.0
/// when = { kind = "domain-contains", patterns = ["clickbait", "unknown"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    /// Stable identifier reported in score breakdowns.
    pub id: String,

    /// Human-readable explanation of what this rule penalizes.
    pub description: String,

    /// Exclusive group. At most one rule of a group applies to a citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Points subtracted when the rule applies. Zero is allowed: such a rule
    /// only claims its group.
    #[serde(default)]
    pub penalty: f64,

    /// The condition under which the rule applies.
    pub when: RuleMatch,
}

/// The default starting score.
pub const DEFAULT_BASE_SCORE: f64 = 100.0;

/// The default age penalty, in points per day.
pub const DEFAULT_AGE_PENALTY_PER_DAY: f64 = 0.01;

fn default_base_score() -> f64 {
    DEFAULT_BASE_SCORE
}

fn default_age_penalty_per_day() -> f64 {
    DEFAULT_AGE_PENALTY_PER_DAY
}

/// The top-level scoring policy.
///
/// Rules are evaluated in the order they appear in the `rules` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Name reported in logs and the audit trail.
    pub name: String,

    /// Score before any penalty.
    #[serde(default = "default_base_score")]
    pub base_score: f64,

    /// Points subtracted per day of citation age.
    #[serde(default = "default_age_penalty_per_day")]
    pub age_penalty_per_day: f64,

    /// Ordered list of rules.
    #[serde(default)]
    pub rules: Vec<ScoringRule>,
}

impl RuleTable {
    /// Parse `s` as TOML and validate the resulting table.
    ///
    /// Returns `AncestorError::ConfigError` if the TOML is malformed, does not
    /// match the `RuleTable` schema, or fails `validate()`.
    pub fn from_toml_str(s: &str) -> AncestorResult<Self> {
        let table: RuleTable = toml::from_str(s).map_err(|e| AncestorError::ConfigError {
            reason: format!("failed to parse rule table TOML: {}", e),
        })?;
        table.validate()?;
        Ok(table)
    }

    /// Read the file at `path` and parse it as a rule table.
    pub fn from_file(path: &Path) -> AncestorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AncestorError::ConfigError {
            reason: format!("failed to read rule table '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Serialize the table as pretty TOML.
    pub fn to_toml_string(&self) -> AncestorResult<String> {
        toml::to_string_pretty(self).map_err(|e| AncestorError::ConfigError {
            reason: format!("failed to serialize rule table '{}': {}", self.name, e),
        })
    }

    /// Check that every penalty is a non-positive adjustment and that the
    /// table is internally consistent.
    ///
    /// - `base_score` is finite and within [0, 100]
    /// - `age_penalty_per_day` is finite and non-negative
    /// - every `penalty` is finite and non-negative
    /// - rule ids are unique
    /// - no rule has an empty pattern list or an empty pattern
    pub fn validate(&self) -> AncestorResult<()> {
        let invalid = |reason: String| AncestorError::ConfigError {
            reason: format!("rule table '{}': {}", self.name, reason),
        };

        if !self.base_score.is_finite() || !(0.0..=100.0).contains(&self.base_score) {
            return Err(invalid(format!(
                "base_score {} must lie within [0, 100]",
                self.base_score
            )));
        }
        if !self.age_penalty_per_day.is_finite() || self.age_penalty_per_day < 0.0 {
            return Err(invalid(format!(
                "age_penalty_per_day {} must be a non-negative number",
                self.age_penalty_per_day
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(invalid(format!("duplicate rule id '{}'", rule.id)));
            }
            if !rule.penalty.is_finite() || rule.penalty < 0.0 {
                return Err(invalid(format!(
                    "rule '{}' has penalty {}; penalties must be non-negative",
                    rule.id, rule.penalty
                )));
            }
            let patterns = rule.when.patterns();
            if patterns.is_empty() || patterns.iter().any(|p| p.is_empty()) {
                return Err(invalid(format!(
                    "rule '{}' needs at least one non-empty pattern",
                    rule.id
                )));
            }
        }

        Ok(())
    }

    /// Return a copy with every pattern lower-cased, ready for matching
    /// against a `Subject`.
    pub fn normalized(&self) -> Self {
        let mut table = self.clone();
        for rule in &mut table.rules {
            for pattern in rule.when.patterns_mut() {
                *pattern = pattern.to_lowercase();
            }
        }
        table
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&ScoringRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Mutable lookup, for overriding one rule of a named variant.
    pub fn rule_mut(&mut self, id: &str) -> Option<&mut ScoringRule> {
        self.rules.iter_mut().find(|r| r.id == id)
    }
}
