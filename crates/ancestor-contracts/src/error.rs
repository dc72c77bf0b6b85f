//! Error types for the simulation pipeline.
//!
//! All fallible operations return `AncestorResult<T>`. Variants carry enough
//! context to produce an actionable diagnostic on stderr.

use thiserror::Error;

/// The unified error type for the Ancestor crates.
#[derive(Debug, Error)]
pub enum AncestorError {
    /// The dataset file is absent or cannot be read.
    #[error("input '{path}' is missing or unreadable: {reason}")]
    MissingInput { path: String, reason: String },

    /// The dataset was read but holds no usable rows.
    #[error("dataset '{source_name}' contains no citation records")]
    EmptyDataset { source_name: String },

    /// A dataset row could not be coerced into a `CitationRecord`.
    ///
    /// `row` is the 1-based data row number, not counting the header.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The chart could not be rendered or written.
    #[error("chart rendering failed: {reason}")]
    Render { reason: String },

    /// An output file (results table, audit log) could not be written.
    #[error("failed to write '{path}': {reason}")]
    OutputWrite { path: String, reason: String },

    /// A rule table or run configuration is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The audit trail could not be appended to.
    ///
    /// Fatal: a run whose steps cannot be audited does not proceed.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// The result sequence broke one of its invariants.
    #[error("result verification failed: {reason}")]
    VerificationFailed { reason: String },
}

/// Convenience alias used throughout the Ancestor crates.
pub type AncestorResult<T> = Result<T, AncestorError>;
