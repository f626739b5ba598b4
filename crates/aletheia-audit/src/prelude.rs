//! Prelude module - commonly used types for convenient import.
//!
//! Use `use aletheia_audit::prelude::*;` to import all essential types.

pub use crate::{AuditError, AuditEvent, AuditResult, AuditSink, record_best_effort};
