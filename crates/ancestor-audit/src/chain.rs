//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. run_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of the step (serde_json with no pretty-printing)

use sha2::{Digest, Sha256};

use ancestor_contracts::{
    audit::AuditStep,
    error::{AncestorError, AncestorResult},
};

use crate::event::AuditEvent;

/// Compute the SHA-256 hash for a single audit event.
///
/// Commits to the event's position (`sequence`), its run (`run_id`), its
/// link to the previous event (`prev_hash`), and the full `step`.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_event(
    run_id: &str,
    sequence: u64,
    step: &AuditStep,
    prev_hash: &str,
) -> AncestorResult<String> {
    let step_json = serde_json::to_vec(step).map_err(|e| AncestorError::AuditWriteFailed {
        reason: format!("failed to encode audit step {}: {}", step.step, e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(run_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&step_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Returns `true` when:
///
/// 1. **Prev-hash linkage**: each event's `prev_hash` equals the
///    `this_hash` of the preceding event (or `GENESIS_HASH` for event 0).
/// 2. **Hash correctness**: each event's `this_hash` matches the value
///    recomputed from its own fields.
/// 3. **Numbering**: sequences run 0, 1, 2, … and step numbers 1, 2, 3, ….
///
/// An empty chain is valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = AuditEvent::GENESIS_HASH.to_string();

    for (idx, event) in events.iter().enumerate() {
        if event.sequence != idx as u64 || event.step.step != idx as u64 + 1 {
            return false;
        }

        if event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(&event.run_id, event.sequence, &event.step, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
