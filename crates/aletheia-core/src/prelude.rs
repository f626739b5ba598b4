//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_core::prelude::*;` to import all essential types.

// Data model
pub use crate::{ActionRequest, Classification, Decision, GateDecision, PromptRequest};

// Tiers
pub use crate::{RiskTier, WorkBudget};

// Wire protocol
pub use crate::{HookEvent, HookInput, HookOutput, HookSpecificOutput};
