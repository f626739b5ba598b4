//! Hook lifecycle events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Events emitted by the agent host that the gate knows how to handle.
///
/// Serialized with the host's own names (`"PreToolUse"`, ...), which are
/// also used as the audit record `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    /// Session has started (or resumed).
    SessionStart,
    /// User has submitted a prompt.
    UserPromptSubmit,
    /// Before a tool call is executed.
    PreToolUse,
    /// After a tool call completes successfully.
    PostToolUse,
    /// A tool call resulted in an error.
    PostToolUseFailure,
    /// The agent is about to stop responding.
    Stop,
    /// Before context compaction.
    PreCompact,
    /// Session is ending.
    SessionEnd,
}

impl HookEvent {
    /// Every event, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::SessionStart,
        Self::UserPromptSubmit,
        Self::PreToolUse,
        Self::PostToolUse,
        Self::PostToolUseFailure,
        Self::Stop,
        Self::PreCompact,
        Self::SessionEnd,
    ];

    /// Kebab-case slug (`pre-tool-use`), used on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::SessionStart => "session-start",
            Self::UserPromptSubmit => "user-prompt-submit",
            Self::PreToolUse => "pre-tool-use",
            Self::PostToolUse => "post-tool-use",
            Self::PostToolUseFailure => "post-tool-use-failure",
            Self::Stop => "stop",
            Self::PreCompact => "pre-compact",
            Self::SessionEnd => "session-end",
        }
    }

    /// Remote authority route for this event, if the event is delegated.
    ///
    /// Post-tool events are handled locally only.
    #[must_use]
    pub fn route(self) -> Option<&'static str> {
        match self {
            Self::SessionStart => Some("/hooks/session-start"),
            Self::UserPromptSubmit => Some("/hooks/user-prompt-submit"),
            Self::PreToolUse => Some("/hooks/pre-tool-use"),
            Self::Stop => Some("/hooks/stop"),
            Self::PreCompact => Some("/hooks/pre-compact"),
            Self::SessionEnd => Some("/hooks/session-end"),
            Self::PostToolUse | Self::PostToolUseFailure => None,
        }
    }

    /// Whether this event belongs to the session lifecycle, where the caller
    /// tolerates a longer remote round trip.
    #[must_use]
    pub fn is_lifecycle(self) -> bool {
        matches!(self, Self::SessionStart | Self::SessionEnd)
    }

    /// The host's name for the event (`PreToolUse`).
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::SessionStart => "SessionStart",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::PostToolUseFailure => "PostToolUseFailure",
            Self::Stop => "Stop",
            Self::PreCompact => "PreCompact",
            Self::SessionEnd => "SessionEnd",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when a string names no known event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hook event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for HookEvent {
    type Err = UnknownEvent;

    /// Accepts either the slug (`pre-tool-use`) or the wire name (`PreToolUse`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.slug() == s || event.wire_name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}
