//! Audit-related error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while recording an audit event.
///
/// None of these ever reach the decision path; see
/// [`record_best_effort`](crate::record_best_effort).
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log file could not be opened, locked or written.
    #[error("audit I/O error at {path}: {source}")]
    Io {
        /// The log file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The event could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An in-process lock was poisoned.
    #[error("audit sink lock poisoned")]
    Lock,

    /// The sink refuses writes.
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
