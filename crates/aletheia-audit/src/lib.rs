//! Aletheia Audit - Append-only record of processed hook events.
//!
//! Every processed event yields exactly one [`AuditEvent`]. Recording is
//! best-effort: [`record_best_effort`] logs a failed write and moves on, so
//! the health of the audit trail never affects a decision.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod event;
mod sink;

pub use error::{AuditError, AuditResult};
pub use event::AuditEvent;
pub use sink::{AuditSink, JsonlAuditSink, MemoryAuditSink, NullAuditSink, record_best_effort};
