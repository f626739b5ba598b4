//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_telemetry::prelude::*;` to import all essential types.

pub use crate::{EvaluationContext, LogConfig, LogFormat, LogTarget, setup_logging};
