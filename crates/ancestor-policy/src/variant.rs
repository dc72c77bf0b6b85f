//! The two named scoring policies.
//!
//! Both share the same rule order:
//!
//! 1. `suspicious-domain-keyword` (group `domain`)
//! 2. `suspicious-domain-name`    (group `domain`, extended only)
//! 3. `trusted-suffix`            (group `domain`, zero penalty)
//! 4. `commercial-suffix`         (group `domain`)
//! 5. `bias-keyword`
//! 6. `misinformation-keyword`    (extended only)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rule::{
    RuleMatch, RuleTable, ScoringRule, DEFAULT_AGE_PENALTY_PER_DAY, DEFAULT_BASE_SCORE,
};

/// Group shared by the mutually exclusive domain rules.
pub const DOMAIN_GROUP: &str = "domain";

/// The category exempt from the commercial-suffix penalty.
pub const TRUSTED_CATEGORY: &str = "Academic Research";

/// A named, built-in rule table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Age, clickbait domains, commercial domains, and bias keywords.
    #[default]
    Baseline,
    /// Baseline plus broader domain keywords, named misinformation domains,
    /// and conspiracy/misinformation description keywords.
    ExtendedMisinformation,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Baseline, Variant::ExtendedMisinformation];

    /// The kebab-case name used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Baseline => "baseline",
            Variant::ExtendedMisinformation => "extended-misinformation",
        }
    }

    /// Build this variant's rule table.
    pub fn table(&self) -> RuleTable {
        match self {
            Variant::Baseline => baseline(),
            Variant::ExtendedMisinformation => extended_misinformation(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                format!("unknown variant '{s}' (expected 'baseline' or 'extended-misinformation')")
            })
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn domain_keyword_rule(patterns: &[&str]) -> ScoringRule {
    ScoringRule {
        id: "suspicious-domain-keyword".to_string(),
        description: "Domain contains a suspicious keyword".to_string(),
        group: Some(DOMAIN_GROUP.to_string()),
        penalty: 20.0,
        when: RuleMatch::DomainContains { patterns: strings(patterns) },
    }
}

fn trusted_suffix_rule() -> ScoringRule {
    ScoringRule {
        id: "trusted-suffix".to_string(),
        description: "Institutional top-level domain; no penalty".to_string(),
        group: Some(DOMAIN_GROUP.to_string()),
        penalty: 0.0,
        when: RuleMatch::DomainSuffix {
            suffixes: strings(&[".edu", ".gov", ".int", ".org"]),
            exempt_category: None,
        },
    }
}

fn commercial_suffix_rule() -> ScoringRule {
    ScoringRule {
        id: "commercial-suffix".to_string(),
        description: "Commercial domain outside the trusted category".to_string(),
        group: Some(DOMAIN_GROUP.to_string()),
        penalty: 5.0,
        when: RuleMatch::DomainSuffix {
            suffixes: strings(&[".com"]),
            exempt_category: Some(TRUSTED_CATEGORY.to_string()),
        },
    }
}

fn bias_rule() -> ScoringRule {
    ScoringRule {
        id: "bias-keyword".to_string(),
        description: "Description flags the source as biased or satirical".to_string(),
        group: None,
        penalty: 15.0,
        when: RuleMatch::DescriptionContains { patterns: strings(&["biased", "satirical"]) },
    }
}

/// The baseline policy.
pub fn baseline() -> RuleTable {
    RuleTable {
        name: Variant::Baseline.name().to_string(),
        base_score: DEFAULT_BASE_SCORE,
        age_penalty_per_day: DEFAULT_AGE_PENALTY_PER_DAY,
        rules: vec![
            domain_keyword_rule(&["clickbait", "unknown"]),
            trusted_suffix_rule(),
            commercial_suffix_rule(),
            bias_rule(),
        ],
    }
}

/// The extended-misinformation policy.
pub fn extended_misinformation() -> RuleTable {
    RuleTable {
        name: Variant::ExtendedMisinformation.name().to_string(),
        base_score: DEFAULT_BASE_SCORE,
        age_penalty_per_day: DEFAULT_AGE_PENALTY_PER_DAY,
        rules: vec![
            domain_keyword_rule(&[
                "clickbait", "unknown", "truth", "expose", "secrets", "alert", "intel",
            ]),
            ScoringRule {
                id: "suspicious-domain-name".to_string(),
                description: "Known misinformation domain".to_string(),
                group: Some(DOMAIN_GROUP.to_string()),
                penalty: 25.0,
                when: RuleMatch::DomainIs { domains: suspicious_domains() },
            },
            trusted_suffix_rule(),
            commercial_suffix_rule(),
            bias_rule(),
            ScoringRule {
                id: "misinformation-keyword".to_string(),
                description: "Description mentions conspiracy or health misinformation".to_string(),
                group: None,
                penalty: 30.0,
                when: RuleMatch::DescriptionContains {
                    patterns: strings(&[
                        "chemtrails",
                        "microchips",
                        "deep state",
                        "global elites",
                        "hoax",
                        "banned by big pharma",
                        "government doesn't want",
                        "mind control",
                    ]),
                },
            },
        ],
    }
}

/// The named misinformation domains of the extended policy.
pub fn suspicious_domains() -> Vec<String> {
    strings(&[
        "worldtruth.biz",
        "naturalhealthexpose.club",
        "healthsecrets.info",
        "medalertblog.xyz",
        "govfalseclaims.net",
        "uncoverthenews.click",
        "truthtimes.today",
        "breaking-health-news.co",
        "freedomvaccine.org",
        "globalintel.site",
    ])
}
