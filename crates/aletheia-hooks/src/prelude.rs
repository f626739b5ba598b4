//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_hooks::prelude::*;` to import all essential types.

pub use crate::{ActionVerdict, DecisionCoordinator, DecisionSource, HookResponse, PromptVerdict};
