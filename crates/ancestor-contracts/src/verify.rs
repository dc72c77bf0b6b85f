//! Result verification report types.
//!
//! Before a result sequence is reported, the verifier checks it and returns
//! a `VerificationReport`. Only a passing report lets reporting proceed.

use serde::{Deserialize, Serialize};

/// The result of running every check against a result sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if all checks passed.
    pub passed: bool,
    /// All failures collected during this verification run. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    /// Build a report from collected failures; passes iff there are none.
    pub fn from_failures(failures: Vec<VerificationFailure>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
        }
    }

    /// One-line summary of every failure, `[check] message; ...`.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.check_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single check failure within a `VerificationReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Identifier of the check that failed, e.g. "episode-sequence".
    pub check_id: String,
    /// Human-readable explanation of why the check failed.
    pub message: String,
}
