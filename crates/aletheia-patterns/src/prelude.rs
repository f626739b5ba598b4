//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_patterns::prelude::*;` to import all essential types.

pub use crate::{PatternCatalog, PatternCategory, PatternError, PatternResult, PatternRule, RuleSpec};
