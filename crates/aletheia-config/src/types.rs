//! Configuration types.
//!
//! This crate has no dependencies on other internal aletheia crates; domain
//! types are mirrored here and converted at the binary's startup boundary.
//! Every section implements [`Default`] so a bare `[section]` header yields a
//! working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote decision authority.
    pub remote: RemoteSection,
    /// Audit trail.
    pub audit: AuditSection,
    /// Diagnostic logging.
    pub logging: LoggingSection,
    /// Tool shapes recognized by the gates.
    pub gate: GateSection,
    /// Pattern catalog composition.
    pub patterns: PatternsSection,
}

/// Remote decision authority endpoint and timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    /// Base URL. Unset or blank means local-only.
    pub url: Option<String>,
    /// Budget for per-action and per-prompt routes.
    pub action_timeout_ms: u64,
    /// Budget for session-lifecycle routes.
    pub lifecycle_timeout_ms: u64,
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            url: None,
            action_timeout_ms: 350,
            lifecycle_timeout_ms: 1000,
        }
    }
}

/// Audit trail destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSection {
    /// Whether events are recorded at all.
    pub enabled: bool,
    /// JSON Lines file. Relative paths resolve against the user config
    /// directory; unset means `events.jsonl` there.
    pub path: Option<String>,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// `pretty`, `compact`, `json` or `full`.
    pub format: String,
    /// `stdout`, `stderr` or `file`.
    pub target: String,
    /// Directory for the `file` target.
    pub directory: Option<String>,
    /// Extra filter directives (`aletheia_remote=debug`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            target: "stderr".to_owned(),
            directory: None,
            directives: Vec::new(),
        }
    }
}

/// Tool shapes recognized by the gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSection {
    /// Tool names that execute shell commands.
    pub shell_tools: Vec<String>,
    /// Name prefix of cross-process extension tools.
    pub external_tool_prefix: String,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            shell_tools: vec!["Bash".to_owned()],
            external_tool_prefix: "mcp__".to_owned(),
        }
    }
}

/// Pattern catalog composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsSection {
    /// Include the built-in rule tables.
    pub builtin: bool,
    /// Additional rules appended after the built-ins.
    pub extra: Vec<ExtraRule>,
}

impl Default for PatternsSection {
    fn default() -> Self {
        Self {
            builtin: true,
            extra: Vec::new(),
        }
    }
}

/// A user-supplied pattern rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRule {
    /// Unique identifier.
    pub id: String,
    /// Category name (`destructive`, `high-risk-command`, `sensitive-path`,
    /// `high-risk-topic`, `low-risk-topic`).
    pub category: String,
    /// Regular expression, matched case-insensitively.
    pub pattern: String,
    /// Message surfaced when the rule matches.
    #[serde(default)]
    pub message: String,
    /// Optional severity (`low`, `medium`, `high`, `critical`).
    #[serde(default)]
    pub severity: Option<String>,
}
