//! Aletheia Core - Shared types for the request-time safety gate.
//!
//! This crate provides the data model that every other Aletheia crate speaks:
//! - [`Classification`] of a user prompt (risk tier, work budget, mode)
//! - [`GateDecision`] for a proposed tool invocation (allow / ask / deny)
//! - [`ActionRequest`] and [`PromptRequest`], the transient inputs
//! - [`HookEvent`], [`HookInput`] and [`HookOutput`], the hook wire protocol
//!
//! # Example
//!
//! ```
//! use aletheia_core::{Decision, GateDecision};
//!
//! let decision = GateDecision::ask("sensitive path detected");
//! assert_eq!(decision.effective(), Decision::Ask);
//!
//! // No decision at all means the caller may proceed.
//! assert_eq!(GateDecision::allow().effective(), Decision::Allow);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod action;
pub mod classification;
pub mod decision;
pub mod hook_event;
pub mod protocol;

pub use action::{ActionRequest, PromptRequest};
pub use classification::{Classification, ParseLabelError, RiskTier, WorkBudget};
pub use decision::{Decision, GateDecision};
pub use hook_event::{HookEvent, UnknownEvent};
pub use protocol::{HookInput, HookOutput, HookSpecificOutput};
