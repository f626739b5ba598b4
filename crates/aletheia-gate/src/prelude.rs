//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_gate::prelude::*;` to import all essential types.

pub use crate::{Classifier, Gate, GateConfig, GateDecisionEngine};
