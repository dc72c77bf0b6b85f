//! # ancestor-audit
//!
//! Append-only, SHA-256 hash-chained audit trail for Ancestor simulation
//! runs.
//!
//! ## Overview
//!
//! Every step a run records is wrapped in an `AuditEvent` that links to the
//! previous event via its SHA-256 hash.  Tampering with any event breaks the
//! chain and is detected by `verify_chain`.  A sealed `AuditLog` renders as
//! the plain-text build log (`[STEP n] …` lines ending in a `[DONE]` marker)
//! and exports as JSON for later re-verification.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ancestor_audit::InMemoryAuditWriter;
//! use ancestor_core::traits::AuditWriter;
//!
//! let writer = InMemoryAuditWriter::new(&run_id);
//! writer.record("Loaded citation data from public_citation_sources.csv")?;
//! writer.finalize()?;
//!
//! assert!(writer.verify_integrity());
//! writer.export_log()?.write_text(Path::new("build_log.txt"))?;
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use memory::InMemoryAuditWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
