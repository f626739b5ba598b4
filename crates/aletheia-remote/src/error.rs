//! Remote client construction errors.
//!
//! Per-call failures are never errors; they are [`RemoteOutcome`](crate::RemoteOutcome)
//! variants. Only building a client can fail.

use thiserror::Error;

/// Errors raised while building a remote client.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The endpoint is not an `http://` or `https://` URL.
    #[error("invalid remote endpoint '{0}': expected an http:// or https:// URL")]
    InvalidUrl(String),

    /// The HTTP client could not be initialized.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Result type for remote client construction.
pub type RemoteResult<T> = Result<T, RemoteError>;
