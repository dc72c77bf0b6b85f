//! In-memory implementation of `AuditWriter`.
//!
//! `InMemoryAuditWriter` keeps all events in a `Vec` protected by a `Mutex`.
//! Use `export_log()` after the run completes to obtain a sealed `AuditLog`,
//! and `verify_integrity()` at any time to confirm the chain is intact.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use ancestor_contracts::{
    audit::{AuditStep, RunId},
    error::{AncestorError, AncestorResult},
};
use ancestor_core::traits::AuditWriter;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<AuditEvent>,

    /// The `this_hash` of the last written event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,

    /// Set by `finalize()`; no further steps are accepted afterwards.
    pub(crate) sealed: bool,
}

// ── Public writer ─────────────────────────────────────────────────────────────

/// An in-memory, append-only audit writer backed by a SHA-256 hash chain.
pub struct InMemoryAuditWriter {
    run_id: String,
    echo: bool,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryAuditWriter {
    /// Create a new writer for the given run.
    pub fn new(run_id: &RunId) -> Self {
        let state = InMemoryState {
            events: Vec::new(),
            last_hash: AuditEvent::GENESIS_HASH.to_string(),
            sealed: false,
        };
        Self {
            run_id: run_id.to_string(),
            echo: false,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Print every recorded step to stdout as it is written.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Export a sealed `AuditLog` containing all events written so far.
    pub fn export_log(&self) -> AncestorResult<AuditLog> {
        let state = self.lock()?;
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(AuditLog {
            run_id: self.run_id.clone(),
            events: state.events.clone(),
            finalized_at: Utc::now(),
            terminal_hash,
        })
    }

    /// Verify that the in-memory chain has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        match self.state.lock() {
            Ok(state) => verify_chain(&state.events),
            Err(_) => false,
        }
    }

    fn lock(&self) -> AncestorResult<std::sync::MutexGuard<'_, InMemoryState>> {
        self.state.lock().map_err(|e| AncestorError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {}", e),
        })
    }
}

// ── AuditWriter impl ──────────────────────────────────────────────────────────

impl AuditWriter for InMemoryAuditWriter {
    /// Append one step to the hash chain.
    ///
    /// The step number is the event's sequence plus one, so steps read
    /// 1, 2, 3, … in the text log.
    fn record(&self, message: &str) -> AncestorResult<AuditStep> {
        let mut state = self.lock()?;
        if state.sealed {
            return Err(AncestorError::AuditWriteFailed {
                reason: format!("audit log for run {} is already finalized", self.run_id),
            });
        }

        let sequence = state.events.len() as u64;
        let step = AuditStep {
            step: sequence + 1,
            message: message.to_string(),
            recorded_at: Utc::now(),
        };
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_event(&self.run_id, sequence, &step, &prev_hash)?;

        info!(step = step.step, message = %step.message, "audit step recorded");
        if self.echo {
            println!("{}", step.render());
        }

        state.events.push(AuditEvent {
            sequence,
            run_id: self.run_id.clone(),
            step: step.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(step)
    }

    /// Seal the log. Later `record()` calls fail.
    fn finalize(&self) -> AncestorResult<()> {
        let mut state = self.lock()?;
        state.sealed = true;

        info!(
            run_id = %self.run_id,
            event_count = state.events.len(),
            terminal_hash = %state.last_hash,
            "audit log finalized"
        );

        Ok(())
    }
}
