//! Permission decisions for proposed actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gating verdict for an action.
///
/// Variants are ordered by severity: `Allow < Ask < Deny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Proceed without confirmation.
    Allow,
    /// Ask the user before proceeding.
    Ask,
    /// Block the action outright.
    Deny,
}

impl Decision {
    /// Lowercase label used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Ask => "ask",
            Self::Deny => "deny",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating an action.
///
/// An empty decision (no fields set) is the default terminal state and is
/// equivalent to [`Decision::Allow`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Explicit verdict, if any gate produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    /// Why the verdict was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Guidance for the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

impl GateDecision {
    /// No decision; the caller proceeds.
    #[must_use]
    pub fn allow() -> Self {
        Self::default()
    }

    /// Require user confirmation.
    #[must_use]
    pub fn ask(reason: impl Into<String>) -> Self {
        Self {
            decision: Some(Decision::Ask),
            reason: Some(reason.into()),
            additional_context: None,
        }
    }

    /// Block the action.
    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            decision: Some(Decision::Deny),
            reason: Some(reason.into()),
            additional_context: None,
        }
    }

    /// Attach guidance for the agent.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = Some(context.into());
        self
    }

    /// The verdict the caller should act on; absence means allow.
    #[must_use]
    pub fn effective(&self) -> Decision {
        self.decision.unwrap_or(Decision::Allow)
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decision.is_none() && self.reason.is_none() && self.additional_context.is_none()
    }

    /// Whether the action is blocked.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.effective() == Decision::Deny
    }

    /// Whether the action requires user interaction.
    #[must_use]
    pub fn requires_interaction(&self) -> bool {
        self.effective() == Decision::Ask
    }
}

impl fmt::Display for GateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.effective()),
            None => write!(f, "{}", self.effective()),
        }
    }
}
