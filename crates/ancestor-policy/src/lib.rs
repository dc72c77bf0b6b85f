//! # ancestor-policy
//!
//! The declarative scoring policy of the Ancestor verifier.
//!
//! ## Overview
//!
//! This crate provides [`RuleTableScorer`], which implements the
//! [`TrustScorer`](ancestor_core::traits::TrustScorer) trait.  Rules are held
//! in a [`RuleTable`], either one of the built-in [`Variant`]s or a table
//! loaded from TOML, and evaluated in declaration order by a single loop.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use ancestor_policy::{RuleTableScorer, Variant};
//!
//! let scorer = RuleTableScorer::for_variant(Variant::ExtendedMisinformation)?;
//! let custom = RuleTableScorer::from_file(Path::new("rules/strict.toml"))?;
//! ```
//!
//! ## Rule groups
//!
//! Rules that name the same `group` are mutually exclusive: the first one to
//! match wins, even when its penalty is zero.  Ungrouped rules stack.

pub mod rule;
pub mod scorer;
pub mod variant;

pub use rule::{RuleMatch, RuleTable, ScoringRule};
pub use scorer::RuleTableScorer;
pub use variant::Variant;

// ── Tests ─────────────────────────────────────────────────────────────────────
