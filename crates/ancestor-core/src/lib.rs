//! # ancestor-core
//!
//! The deterministic episode runtime for the Ancestor trust simulation.
//!
//! This crate provides:
//! - The four seam traits (`ClaimSampler`, `TrustScorer`, `AcceptanceGate`, `AuditWriter`)
//! - `ThresholdGate`, the default acceptance gate
//! - The `EpisodeRunner` that wires them together in the correct order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ancestor_core::{EpisodeRunner, ThresholdGate};
//!
//! let runner = EpisodeRunner::new(sampler, scorer, Box::new(ThresholdGate::default()), audit);
//! let results = runner.run(&dataset, 100, &mut rng)?;
//! ```

pub mod gate;
pub mod runner;
pub mod traits;

pub use gate::{accept, ThresholdGate, DEFAULT_THRESHOLD};
pub use runner::EpisodeRunner;
