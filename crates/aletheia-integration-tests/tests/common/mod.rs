//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use aletheia_audit::JsonlAuditSink;
use aletheia_core::HookInput;
use aletheia_hooks::DecisionCoordinator;
use aletheia_patterns::PatternCatalog;
use aletheia_remote::{HttpRemoteClient, RemoteConfig, RemoteTimeouts};
use serde_json::{Value, json};

/// Budgets short enough to keep timeout tests fast.
pub const TEST_TIMEOUTS: RemoteTimeouts = RemoteTimeouts {
    action: Duration::from_millis(200),
    lifecycle: Duration::from_millis(400),
};

/// Built-in catalog, shared.
pub fn catalog() -> Arc<PatternCatalog> {
    Arc::new(PatternCatalog::builtin().unwrap())
}

/// Coordinator wired to a real HTTP client and a JSONL audit file.
pub fn coordinator(remote_url: Option<&str>, audit_path: &Path) -> DecisionCoordinator {
    let config = RemoteConfig {
        base_url: remote_url.map(str::to_string),
        timeouts: TEST_TIMEOUTS,
    };
    let remote = HttpRemoteClient::new(&config).unwrap();
    DecisionCoordinator::new(catalog())
        .with_remote(Arc::new(remote), config.timeouts)
        .with_audit(Arc::new(JsonlAuditSink::new(audit_path)))
}

/// Host payload for a shell command.
pub fn bash(command: &str) -> HookInput {
    input(json!({
        "hook_event_name": "PreToolUse",
        "session_id": "s-1",
        "tool_name": "Bash",
        "tool_input": {"command": command},
    }))
}

/// Host payload from a JSON literal.
pub fn input(value: Value) -> HookInput {
    let Value::Object(map) = value else {
        panic!("hook payload must be an object");
    };
    HookInput::new(map)
}

/// Audit records as parsed JSON values, one per line.
pub fn audit_lines(path: &Path) -> Vec<Value> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    text.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
