//! Audit event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One processed hook event.
///
/// Serialized as a single JSON line: `{"ts": ..., "kind": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the event was processed.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// Event kind (`PreToolUse`, `UserPromptSubmit`, ...).
    pub kind: String,
    /// What was decided and from which inputs.
    pub payload: Value,
}

impl AuditEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: kind.into(),
            payload,
        }
    }

    /// Override the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
