// error.rs — Error types for the audit trail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during audit operations.
///
/// The caller is expected to catch and log these around evaluation — an
/// audit failure must never turn into an evaluation failure.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to open or create the audit log file.
    #[error("failed to open audit log at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a record to the log.
    #[error("failed to append audit record: {0}")]
    WriteFailed(#[from] std::io::Error),

    /// Failed to read the log back for replay or verification.
    #[error("failed to read audit log: {0}")]
    ReadFailed(std::io::Error),

    /// Malformed JSON in the log or record.
    #[error("audit serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The hash chain is broken — the log has been altered.
    #[error("integrity check failed at line {line}: expected hash {expected}, got {actual}")]
    IntegrityViolation {
        line: usize,
        expected: String,
        actual: String,
    },
}
