//! Audit event and log types.
//!
//! `AuditEvent` is a single entry in the hash chain: it wraps an `AuditStep`
//! with sequence numbering and the SHA-256 hashes that make tampering
//! detectable.  `AuditLog` is the sealed record exported when a run ends.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ancestor_contracts::{
    audit::AuditStep,
    error::{AncestorError, AncestorResult},
};

use crate::chain::verify_chain;

/// A single entry in the SHA-256 hash chain for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The run this event belongs to.
    pub run_id: String,

    /// The immutable step.
    pub step: AuditStep,

    /// Hash of the previous event, or `GENESIS_HASH` for the first event.
    pub prev_hash: String,

    /// Hash of this event's canonical content.
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` used for the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed audit log for a single run.
///
/// The `terminal_hash` is the `this_hash` of the last event and commits to
/// the entire log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub run_id: String,

    /// All audit events in chain order.
    pub events: Vec<AuditEvent>,

    /// Wall-clock time (UTC) the log was exported.
    pub finalized_at: DateTime<Utc>,

    /// Empty string if the log is empty.
    pub terminal_hash: String,
}

impl AuditLog {
    /// The marker line that terminates the text build log.
    pub const DONE_MARKER: &'static str = "[DONE] Simulation complete with all outputs generated.";

    /// Load a log previously written with `write_json`.
    pub fn from_json_file(path: &Path) -> AncestorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AncestorError::MissingInput {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| AncestorError::ConfigError {
            reason: format!("'{}' is not an audit log: {}", path.display(), e),
        })
    }

    /// Write the log, hashes included, as pretty JSON.
    pub fn write_json(&self, path: &Path) -> AncestorResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| AncestorError::OutputWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        write_file(path, json)
    }

    /// Re-check an exported log: the chain itself, that every event belongs
    /// to this log's run, and that `terminal_hash` names the last event.
    pub fn verify(&self) -> bool {
        let terminal_ok = self
            .events
            .last()
            .map_or(self.terminal_hash.is_empty(), |e| e.this_hash == self.terminal_hash);

        terminal_ok
            && self.events.iter().all(|e| e.run_id == self.run_id)
            && verify_chain(&self.events)
    }

    /// Render the human-readable build log.
    ///
    /// A title block, one `[STEP n]` line per event, then `DONE_MARKER`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("MULTI-AGENT TRUST SIMULATION - BUILD EXECUTION LOG\n");
        out.push_str(&"=".repeat(60));
        out.push_str("\n\n");
        out.push_str("This log tracks every step taken to produce the simulation outputs.\n");
        out.push_str(&format!("Run: {}\n", self.run_id));
        if !self.terminal_hash.is_empty() {
            out.push_str(&format!("Terminal hash: {}\n", self.terminal_hash));
        }
        out.push('\n');

        for event in &self.events {
            out.push_str(&event.step.render());
            out.push('\n');
        }

        out.push('\n');
        out.push_str(Self::DONE_MARKER);
        out.push('\n');
        out
    }

    /// Write `render_text()` to `path`.
    pub fn write_text(&self, path: &Path) -> AncestorResult<()> {
        write_file(path, self.render_text())
    }
}

fn write_file(path: &Path, contents: String) -> AncestorResult<()> {
    std::fs::write(path, contents).map_err(|e| AncestorError::OutputWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
