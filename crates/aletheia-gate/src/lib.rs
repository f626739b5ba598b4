//! Aletheia Gate - Local classification and gating.
//!
//! - [`Classifier`] turns a prompt into a risk tier, work budget and mode.
//! - [`GateDecisionEngine`] turns a proposed tool call into allow / ask / deny
//!   by running an ordered list of [`Gate`]s.
//!
//! Both are pure and deterministic and share one read-only
//! [`PatternCatalog`](aletheia_patterns::PatternCatalog).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use aletheia_core::{ActionRequest, Decision};
//! use aletheia_gate::GateDecisionEngine;
//! use aletheia_patterns::PatternCatalog;
//!
//! let catalog = Arc::new(PatternCatalog::builtin().unwrap());
//! let engine = GateDecisionEngine::new(catalog);
//!
//! let decision = engine.evaluate(&ActionRequest::shell("Bash", "git push origin main"));
//! assert_eq!(decision.effective(), Decision::Ask);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod classifier;
pub mod engine;

pub use classifier::Classifier;
pub use engine::{Evaluation, Gate, GateConfig, GateDecisionEngine};
