//! What a handled event writes back to the host.

use aletheia_core::HookOutput;
use serde_json::Value;
use tracing::warn;

/// Response to a hook event.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HookResponse {
    /// A JSON object, written compactly.
    Json(Value),
    /// Plain text, written with a trailing newline.
    Text(String),
    /// Nothing is written.
    #[default]
    Empty,
}

impl HookResponse {
    /// Response for a structured output. An empty output writes nothing.
    #[must_use]
    pub fn from_output(output: &HookOutput) -> Self {
        if output.is_empty() {
            return Self::Empty;
        }
        match serde_json::to_value(output) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                warn!(error = %e, "Failed to serialize hook output");
                Self::Empty
            },
        }
    }

    /// Text to write to stdout, if any.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Json(value) => Some(value.to_string()),
            Self::Text(text) => Some(format!("{}\n", text.trim())),
            Self::Empty => None,
        }
    }

    /// JSON payload, if this is a JSON response.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Whether nothing would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
