//! Aletheia Remote - Optional remote decision authority.
//!
//! The remote authority may override local classification and gating. It is
//! optional: an unconfigured client answers [`RemoteOutcome::NotConfigured`]
//! without doing any I/O, and every failure (timeout, refused connection,
//! bad status, empty or malformed body) is an explicit [`RemoteOutcome`]
//! that the caller treats as "no override". Calls are never retried.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use aletheia_remote::{HttpRemoteClient, RemoteAuthority, RemoteConfig, RemoteOutcome};
//!
//! # tokio_test_block(async {
//! let client = HttpRemoteClient::new(&RemoteConfig::default()).unwrap();
//! let outcome = client
//!     .try_override("/hooks/pre-tool-use", &serde_json::json!({}), Duration::from_millis(350))
//!     .await;
//! assert_eq!(outcome, RemoteOutcome::NotConfigured);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f);
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod client;
mod config;
mod error;
mod outcome;

pub use client::{DisabledRemote, HttpRemoteClient, RemoteAuthority};
pub use config::{RemoteConfig, RemoteTimeouts};
pub use error::{RemoteError, RemoteResult};
pub use outcome::RemoteOutcome;
