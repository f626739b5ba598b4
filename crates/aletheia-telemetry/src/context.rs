//! Per-evaluation context for correlating log lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for a single hook evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationContext {
    /// Unique evaluation identifier.
    pub evaluation_id: Uuid,
    /// Hook event being processed (`PreToolUse`, ...).
    pub event: String,
    /// Tool under evaluation, for tool events.
    pub tool: Option<String>,
    /// Session identifier supplied by the host, if any.
    pub session_id: Option<String>,
    /// When the evaluation started.
    pub started_at: DateTime<Utc>,
}

impl EvaluationContext {
    /// Create a context for `event`.
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            evaluation_id: Uuid::new_v4(),
            event: event.into(),
            tool: None,
            session_id: None,
            started_at: Utc::now(),
        }
    }

    /// Set the tool name.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set the host session identifier.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Milliseconds since the evaluation started.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_milliseconds()
    }

    /// First eight characters of the evaluation id.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.evaluation_id.simple().to_string().chars().take(8).collect()
    }

    /// A tracing span carrying this context.
    #[must_use]
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "evaluation",
            id = %self.short_id(),
            event = %self.event,
            tool = self.tool.as_deref(),
            session = self.session_id.as_deref(),
        )
    }
}
