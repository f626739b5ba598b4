//! Hook wire protocol: the event payload the host sends and the response it reads.
//!
//! Incoming payloads are free-form; different host versions use different key
//! names for the same field. [`HookInput`] keeps the raw object and resolves
//! each field through an ordered list of aliases.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::{ActionRequest, PromptRequest};
use crate::decision::{Decision, GateDecision};
use crate::hook_event::HookEvent;

const PROMPT_KEYS: [&str; 4] = ["prompt", "user_prompt", "input", "text"];
const TOOL_NAME_KEYS: [&str; 3] = ["tool_name", "tool", "name"];
const TOOL_RESPONSE_KEYS: [&str; 3] = ["tool_response", "response", "output"];
const ERROR_KEYS: [&str; 3] = ["error", "error_message", "stderr"];

/// An incoming hook event payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookInput {
    raw: Map<String, Value>,
}

impl HookInput {
    /// Wrap an already-parsed object.
    #[must_use]
    pub fn new(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    /// Parse raw text read from the host.
    ///
    /// Never fails: blank input yields an empty payload, a JSON value that is
    /// not an object is kept under `_value`, and unparseable text under `_raw`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        let mut raw = Map::new();
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(object)) => return Self { raw: object },
            Ok(other) => {
                raw.insert("_value".to_string(), other);
            },
            Err(_) => {
                raw.insert("_raw".to_string(), Value::String(trimmed.to_string()));
            },
        }
        Self { raw }
    }

    /// The raw payload.
    #[must_use]
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// The raw payload as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.raw.clone())
    }

    /// String field by exact key.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.str_field(key))
    }

    /// Event named by the payload itself, if any.
    #[must_use]
    pub fn event(&self) -> Option<HookEvent> {
        self.str_field("hook_event_name")?.parse().ok()
    }

    /// Prompt text; empty when absent.
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        self.first_str(&PROMPT_KEYS).unwrap_or_default()
    }

    /// Tool name; empty when absent.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        self.first_str(&TOOL_NAME_KEYS).unwrap_or_default()
    }

    /// Tool parameters; empty when absent or not an object.
    #[must_use]
    pub fn tool_input(&self) -> Map<String, Value> {
        self.raw
            .get("tool_input")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Tool output text (post-tool events).
    #[must_use]
    pub fn tool_response(&self) -> &str {
        self.first_str(&TOOL_RESPONSE_KEYS).unwrap_or_default()
    }

    /// Error text (failure events).
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.first_str(&ERROR_KEYS).unwrap_or_default()
    }

    /// Whether the failure was a user interrupt.
    #[must_use]
    pub fn is_interrupt(&self) -> bool {
        self.raw
            .get("is_interrupt")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Working directory of the session.
    #[must_use]
    pub fn cwd(&self) -> Option<&str> {
        self.str_field("cwd")
    }

    /// The proposed action carried by a pre/post tool event.
    #[must_use]
    pub fn to_action_request(&self) -> ActionRequest {
        ActionRequest::new(self.tool_name(), self.tool_input())
    }

    /// The prompt carried by a prompt event.
    #[must_use]
    pub fn to_prompt_request(&self) -> PromptRequest {
        PromptRequest::new(self.prompt_text())
    }
}

/// Event-specific fields of a hook response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Event this output answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_event_name: Option<String>,
    /// Permission verdict (pre-tool events).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<Decision>,
    /// Why the verdict was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
    /// Guidance injected into the agent's context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Structured hook response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Event-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

impl HookOutput {
    /// Response carrying a gate decision. An empty decision yields an empty output.
    #[must_use]
    pub fn from_gate(event: HookEvent, decision: &GateDecision) -> Self {
        if decision.is_empty() {
            return Self::default();
        }
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(event.wire_name().to_string()),
                permission_decision: decision.decision,
                permission_decision_reason: decision.reason.clone(),
                additional_context: decision.additional_context.clone(),
            }),
        }
    }

    /// Response that only injects context.
    #[must_use]
    pub fn context(event: HookEvent, message: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: Some(event.wire_name().to_string()),
                additional_context: Some(message.into()),
                ..HookSpecificOutput::default()
            }),
        }
    }

    /// Parse a response received from an untrusted source.
    ///
    /// Requires a `hookSpecificOutput` object whose fields have the expected
    /// types and which carries a `permissionDecision`. A missing or unknown
    /// label rejects the whole payload.
    #[must_use]
    pub fn from_untrusted(object: &Map<String, Value>) -> Option<Self> {
        let specific = object.get("hookSpecificOutput")?;
        if !specific.is_object() {
            return None;
        }
        let specific: HookSpecificOutput = serde_json::from_value(specific.clone()).ok()?;
        if specific.permission_decision.is_none() {
            return None;
        }
        Some(Self {
            hook_specific_output: Some(specific),
        })
    }

    /// The gate decision this output expresses.
    #[must_use]
    pub fn to_gate_decision(&self) -> GateDecision {
        self.hook_specific_output
            .as_ref()
            .map(|specific| GateDecision {
                decision: specific.permission_decision,
                reason: specific.permission_decision_reason.clone(),
                additional_context: specific.additional_context.clone(),
            })
            .unwrap_or_default()
    }

    /// Whether nothing would be written back to the host.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hook_specific_output.is_none()
    }
}
