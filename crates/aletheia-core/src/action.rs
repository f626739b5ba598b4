//! Transient inputs to the classifier and the gate engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameter keys that carry the path an action touches, in lookup order.
pub const PATH_KEYS: [&str; 3] = ["file_path", "path", "notebook_path"];

/// A proposed side-effecting operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Tool the agent wants to invoke (`Bash`, `Edit`, `mcp__github__create_issue`).
    pub tool_name: String,
    /// Structured tool parameters.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// File or notebook path the action touches, if any.
    #[serde(default)]
    pub changed_path: Option<String>,
}

impl ActionRequest {
    /// Build a request, deriving `changed_path` from the parameters.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        let changed_path = PATH_KEYS
            .iter()
            .find_map(|key| parameters.get(*key).and_then(Value::as_str))
            .map(str::to_string);
        Self {
            tool_name: tool_name.into(),
            parameters,
            changed_path,
        }
    }

    /// Convenience constructor for a shell invocation.
    #[must_use]
    pub fn shell(tool_name: impl Into<String>, command: impl Into<String>) -> Self {
        let mut parameters = Map::new();
        parameters.insert("command".to_string(), Value::String(command.into()));
        Self::new(tool_name, parameters)
    }

    /// Text of the `command` parameter.
    ///
    /// Non-string values are rendered as JSON so that they are still scanned.
    #[must_use]
    pub fn command_text(&self) -> String {
        match self.parameters.get("command") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// A user's natural-language request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Raw prompt text.
    pub text: String,
}

impl PromptRequest {
    /// Wrap prompt text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
