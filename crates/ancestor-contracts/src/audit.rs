//! Audit step and run identity types.
//!
//! Every notable action of a run is recorded as one numbered `AuditStep`.
//! The audit writer appends these to its store; steps are never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a single simulation run.
///
/// Appears in every audit event so exported logs can be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable, human-readable record of one step taken during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// 1-based step number, sequential within a run.
    pub step: u64,
    /// What happened, e.g. "Saving simulation results to results.csv".
    pub message: String,
    /// Wall-clock time the step was recorded (UTC).
    pub recorded_at: DateTime<Utc>,
}

impl AuditStep {
    /// Render the step the way it appears in the text build log.
    pub fn render(&self) -> String {
        format!("[STEP {}] {}", self.step, self.message)
    }
}
