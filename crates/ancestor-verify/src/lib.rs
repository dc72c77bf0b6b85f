//! # ancestor-verify
//!
//! Invariant checks over a simulation's result sequence.
//!
//! This crate provides [`engine::ResultVerifier`], run between the episode
//! loop and the reporters: nothing is written unless the results pass.
//!
//! ```rust,ignore
//! use ancestor_verify::ResultVerifier;
//!
//! ResultVerifier::new(100, 60.0).ensure(&results)?;
//! ```

pub mod engine;

pub use engine::ResultVerifier;

#[cfg(test)]
mod tests {
    use ancestor_contracts::{
        citation::{CitationRecord, ScoreResult},
        error::AncestorError,
    };

    use crate::ResultVerifier;

    fn result(episode: u32, score: f64, accepted: bool) -> ScoreResult {
        ScoreResult {
            episode,
            citation: CitationRecord::new("Blog", "https://a.com", "a.com", 0, ""),
            score,
            accepted,
        }
    }

    fn check_ids(verifier: ResultVerifier, results: &[ScoreResult]) -> Vec<String> {
        verifier
            .verify(results)
            .failures
            .into_iter()
            .map(|f| f.check_id)
            .collect()
    }

    #[test]
    fn test_well_formed_sequence_passes() {
        let results = vec![result(1, 99.9, true), result(2, 59.0, false), result(3, 60.0, true)];
        let report = ResultVerifier::new(3, 60.0).verify(&results);
        assert!(report.passed);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_empty_sequence_passes_for_zero_episodes() {
        assert!(ResultVerifier::new(0, 60.0).verify(&[]).passed);
    }

    #[test]
    fn test_gap_and_repeat_detected() {
        let gap = vec![result(1, 70.0, true), result(3, 70.0, true)];
        assert_eq!(check_ids(ResultVerifier::new(2, 60.0), &gap), vec!["episode-sequence"]);

        let repeat = vec![result(1, 70.0, true), result(1, 70.0, true)];
        assert_eq!(check_ids(ResultVerifier::new(2, 60.0), &repeat), vec!["episode-sequence"]);
    }

    #[test]
    fn test_count_mismatch_detected() {
        let results = vec![result(1, 70.0, true)];
        assert_eq!(check_ids(ResultVerifier::new(2, 60.0), &results), vec!["episode-count"]);
    }

    #[test]
    fn test_out_of_range_score_detected() {
        let results = vec![result(1, 101.0, true), result(2, f64::NAN, false)];
        assert_eq!(
            check_ids(ResultVerifier::new(2, 60.0), &results),
            vec!["score-bounds", "score-bounds"]
        );
    }

    #[test]
    fn test_gate_inconsistency_detected() {
        let results = vec![result(1, 59.99, true), result(2, 60.0, false)];
        assert_eq!(
            check_ids(ResultVerifier::new(2, 60.0), &results),
            vec!["gate-consistency", "gate-consistency"]
        );
    }

    /// All failures are collected, not just the first.
    #[test]
    fn test_ensure_reports_every_failure() {
        let results = vec![result(2, 120.0, false)];

        match ResultVerifier::new(3, 60.0).ensure(&results) {
            Err(AncestorError::VerificationFailed { reason }) => {
                assert!(reason.contains("[episode-count]"), "got: {reason}");
                assert!(reason.contains("[episode-sequence]"), "got: {reason}");
                assert!(reason.contains("[score-bounds]"), "got: {reason}");
                assert!(reason.contains("[gate-consistency]"), "got: {reason}");
            }
            other => panic!("expected VerificationFailed, got {:?}", other),
        }
    }
}
