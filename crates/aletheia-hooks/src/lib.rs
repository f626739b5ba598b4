//! Aletheia Hooks - Event coordination for the request-time safety gate.
//!
//! The [`DecisionCoordinator`] handles each host event: it consults the
//! optional remote authority first, falls back to the local classifier and
//! gate engine, and records one audit event per call.
//!
//! Lifecycle events also get local guidance: a session banner with the
//! detected repository [`stack`], compaction structure, proof-packet
//! reminders and post-tool [`advisory`] texts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use aletheia_core::{HookEvent, HookInput};
//! use aletheia_hooks::{DecisionCoordinator, HookResponse};
//! use aletheia_patterns::PatternCatalog;
//!
//! let coordinator = DecisionCoordinator::new(Arc::new(PatternCatalog::builtin().unwrap()));
//! let input = HookInput::parse(r#"{"tool_name": "Bash", "tool_input": {"command": "ls -la"}}"#);
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let response = runtime.block_on(coordinator.handle(HookEvent::PreToolUse, &input));
//! assert_eq!(response, HookResponse::Empty);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod advisory;
pub mod coordinator;
pub mod response;
pub mod stack;

pub use coordinator::{ActionVerdict, DecisionCoordinator, DecisionSource, PromptVerdict};
pub use response::HookResponse;
pub use stack::detect_stack;
