//! Aletheia Telemetry - Diagnostic logging for the safety gate.
//!
//! This crate provides:
//! - [`setup_logging`] driven by a [`LogConfig`]
//! - [`EvaluationContext`] to correlate everything logged for one hook event
//!
//! Diagnostic logs are separate from the audit trail: they describe how the
//! gate behaved, not what it decided.
//!
//! # Example
//!
//! ```rust,no_run
//! use aletheia_telemetry::{EvaluationContext, LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), aletheia_telemetry::TelemetryError> {
//! setup_logging(&LogConfig::new("debug").with_format(LogFormat::Json))?;
//!
//! let ctx = EvaluationContext::new("PreToolUse").with_tool("Bash");
//! let _guard = ctx.span().entered();
//! tracing::debug!("evaluating");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod context;
mod error;
mod logging;

pub use context::EvaluationContext;
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
