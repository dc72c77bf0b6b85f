//! The claimant: uniform sampling with an explicit random source.

use rand::{seq::SliceRandom, Rng, RngCore};
use serde::{Deserialize, Serialize};

use ancestor_contracts::{
    citation::CitationRecord,
    error::{AncestorError, AncestorResult},
};
use ancestor_core::traits::ClaimSampler;

/// Where a sampled claim's `age_days` comes from.
///
/// ```toml
/// age = { source = "dataset" }
/// age = { source = "synthesized", min = 0, max = 365 }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum AgeSource {
    /// Use the dataset's `Age` column.
    #[default]
    Dataset,
    /// Draw a uniform integer in `min..=max` for every claim.
    Synthesized { min: u32, max: u32 },
}

impl AgeSource {
    /// The synthesized range used when none is configured.
    pub const DEFAULT_SYNTHESIZED: AgeSource = AgeSource::Synthesized { min: 0, max: 365 };
}

/// Draws records uniformly, with replacement, then applies its `AgeSource`.
///
/// Per claim the draw order is fixed: record index first, then (if
/// synthesized) the age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformSampler {
    age: AgeSource,
}

impl UniformSampler {
    pub fn new(age: AgeSource) -> Self {
        Self { age }
    }
}

impl ClaimSampler for UniformSampler {
    fn sample(
        &self,
        dataset: &[CitationRecord],
        rng: &mut dyn RngCore,
    ) -> AncestorResult<CitationRecord> {
        let record = dataset.choose(rng).ok_or_else(|| AncestorError::EmptyDataset {
            source_name: "in-memory dataset".to_string(),
        })?;

        match self.age {
            AgeSource::Dataset => Ok(record.clone()),
            AgeSource::Synthesized { min, max } => Ok(record.with_age(rng.gen_range(min..=max))),
        }
    }
}
