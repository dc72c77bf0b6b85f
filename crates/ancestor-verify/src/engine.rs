//! Result-sequence verifier.
//!
//! `ResultVerifier` runs every check against a result sequence and collects
//! all failures before returning, so operators see the full failure set in
//! one pass:
//!
//! - `episode-count`: the sequence holds exactly the requested episodes
//! - `episode-sequence`: episodes read 1, 2, ..., N with no gaps or repeats
//! - `score-bounds`: every score is finite and within [0, 100]
//! - `gate-consistency`: `accepted` is true iff `score >= threshold`

use tracing::{debug, warn};

use ancestor_contracts::{
    citation::ScoreResult,
    error::{AncestorError, AncestorResult},
    verify::{VerificationFailure, VerificationReport},
};
use ancestor_core::accept;

/// Checks the invariants of one run's result sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultVerifier {
    expected_episodes: u32,
    threshold: f64,
}

impl ResultVerifier {
    pub fn new(expected_episodes: u32, threshold: f64) -> Self {
        Self { expected_episodes, threshold }
    }

    /// Run every check and return the full report.
    pub fn verify(&self, results: &[ScoreResult]) -> VerificationReport {
        let mut failures = Vec::new();
        let mut fail = |check_id: &str, message: String| {
            warn!(check_id, %message, "result verification failure");
            failures.push(VerificationFailure {
                check_id: check_id.to_string(),
                message,
            });
        };

        if results.len() != self.expected_episodes as usize {
            fail(
                "episode-count",
                format!(
                    "expected {} episodes, found {}",
                    self.expected_episodes,
                    results.len()
                ),
            );
        }

        for (idx, result) in results.iter().enumerate() {
            let expected = idx as u64 + 1;
            if u64::from(result.episode) != expected {
                fail(
                    "episode-sequence",
                    format!(
                        "position {} holds episode {}, expected {}",
                        idx, result.episode, expected
                    ),
                );
            }

            if !result.score.is_finite() || !(0.0..=100.0).contains(&result.score) {
                fail(
                    "score-bounds",
                    format!("episode {} scored {}", result.episode, result.score),
                );
            }

            if result.accepted != accept(result.score, self.threshold) {
                fail(
                    "gate-consistency",
                    format!(
                        "episode {} scored {} but accepted = {} at threshold {}",
                        result.episode, result.score, result.accepted, self.threshold
                    ),
                );
            }
        }

        let report = VerificationReport::from_failures(failures);
        debug!(
            passed = report.passed,
            failures = report.failures.len(),
            "result verification complete"
        );
        report
    }

    /// Verify and convert a failing report into `VerificationFailed`.
    pub fn ensure(&self, results: &[ScoreResult]) -> AncestorResult<VerificationReport> {
        let report = self.verify(results);
        if report.passed {
            Ok(report)
        } else {
            Err(AncestorError::VerificationFailed {
                reason: report.summary(),
            })
        }
    }
}
