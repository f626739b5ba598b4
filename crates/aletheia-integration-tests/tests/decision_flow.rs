//! End-to-end decision flow: host payload in, hook response out.
//!
//! Runs the coordinator against a real HTTP remote (mocked with wiremock)
//! and a JSONL audit file, checking that the remote can only override with
//! a well-formed answer and that every failure mode falls back to the local
//! decision without delaying the host past the route budget.

mod common;

use std::fs::OpenOptions;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use aletheia_core::{Classification, Decision, HookEvent, RiskTier};
use aletheia_hooks::{DecisionSource, HookResponse};
use fs2::FileExt;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{audit_lines, bash, coordinator, input};

#[tokio::test]
async fn test_local_deny_without_remote() {
    let dir = TempDir::new().unwrap();
    let audit = dir.path().join("audit.jsonl");
    let coordinator = coordinator(None, &audit);

    let response = coordinator.handle(HookEvent::PreToolUse, &bash("rm -rf /")).await;
    let value = response.as_json().unwrap();
    assert_eq!(value["hookSpecificOutput"]["permissionDecision"], "deny");
    assert_eq!(value["hookSpecificOutput"]["hookEventName"], "PreToolUse");

    let lines = audit_lines(&audit);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "PreToolUse");
    assert_eq!(lines[0]["payload"]["source"], "local");
    assert_eq!(lines[0]["payload"]["decision"]["decision"], "deny");
}

#[tokio::test]
async fn test_benign_command_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let coordinator = coordinator(None, &dir.path().join("audit.jsonl"));

    let response = coordinator.handle(HookEvent::PreToolUse, &bash("ls -la")).await;
    assert!(response.is_empty());
    assert!(response.render().is_none());
}

#[tokio::test]
async fn test_remote_override_is_passed_through() {
    let server = MockServer::start().await;
    let answer = json!({
        "hookSpecificOutput": {
            "hookEventName": "PreToolUse",
            "permissionDecision": "allow",
            "permissionDecisionReason": "approved by policy server"
        },
        "suppressOutput": true
    });
    Mock::given(method("POST"))
        .and(path("/hooks/pre-tool-use"))
        .and(body_partial_json(json!({
            "tool_name": "Bash",
            "toolName": "Bash",
            "toolInput": {"command": "git push origin main"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&answer))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audit = dir.path().join("audit.jsonl");
    let coordinator = coordinator(Some(&server.uri()), &audit);

    let verdict = coordinator
        .evaluate_action(&bash("git push origin main"))
        .await;
    assert_eq!(verdict.source, DecisionSource::Remote);
    assert_eq!(verdict.decision.effective(), Decision::Allow);
    assert_eq!(verdict.response, HookResponse::Json(answer));

    let lines = audit_lines(&audit);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["payload"]["source"], "remote");
}

#[tokio::test]
async fn test_remote_timeout_falls_back_within_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/pre-tool-use"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"hookSpecificOutput": {"permissionDecision": "allow"}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let coordinator = coordinator(Some(&server.uri()), &dir.path().join("audit.jsonl"));

    let started = Instant::now();
    let verdict = coordinator.evaluate_action(&bash("rm -rf /")).await;
    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(verdict.source, DecisionSource::Local);
    assert_eq!(verdict.decision.effective(), Decision::Deny);
}

#[tokio::test]
async fn test_malformed_remote_answers_fall_back() {
    let bodies = [
        ResponseTemplate::new(200).set_body_string("not json"),
        ResponseTemplate::new(200).set_body_string(""),
        ResponseTemplate::new(200).set_body_json(json!(["allow"])),
        ResponseTemplate::new(200).set_body_json(json!({"decision": "allow"})),
        ResponseTemplate::new(200)
            .set_body_json(json!({"hookSpecificOutput": {"permissionDecision": "maybe"}})),
        ResponseTemplate::new(200)
            .set_body_json(json!({"hookSpecificOutput": {"additionalContext": "fyi"}})),
        ResponseTemplate::new(200).set_body_json(json!({"hookSpecificOutput": {}})),
        ResponseTemplate::new(503),
    ];

    for template in bodies {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hooks/pre-tool-use"))
            .respond_with(template)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(Some(&server.uri()), &dir.path().join("audit.jsonl"));
        let verdict = coordinator.evaluate_action(&bash("git push origin main")).await;
        assert_eq!(verdict.source, DecisionSource::Local);
        assert_eq!(verdict.decision.effective(), Decision::Ask);
    }
}

#[tokio::test]
async fn test_unreachable_remote_falls_back() {
    let dir = TempDir::new().unwrap();
    let coordinator = coordinator(Some("http://127.0.0.1:9"), &dir.path().join("audit.jsonl"));
    let verdict = coordinator.evaluate_action(&bash("sudo ls")).await;
    assert_eq!(verdict.source, DecisionSource::Local);
    assert_eq!(verdict.decision.effective(), Decision::Ask);
}

#[tokio::test]
async fn test_prompt_classification_remote_and_local() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/user-prompt-submit"))
        .and(body_partial_json(json!({
            "prompt": "fix the typo in the readme",
            "classification": {"risk": "low"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "classification": {"risk": "high", "budget": "deliberate", "mode": "verify-first"}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let audit = dir.path().join("audit.jsonl");
    let coordinator = coordinator(Some(&server.uri()), &audit);

    let prompt = input(json!({
        "hook_event_name": "UserPromptSubmit",
        "prompt": "fix the typo in the readme"
    }));
    let verdict = coordinator.evaluate_prompt(&prompt).await;
    assert_eq!(verdict.source, DecisionSource::Remote);
    assert_eq!(verdict.classification, Classification::high());

    let text = verdict.response.render().unwrap();
    assert!(text.starts_with("Preflight: risk=high, budget=deliberate, mode=verify-first"));

    let lines = audit_lines(&audit);
    assert_eq!(lines[0]["kind"], "UserPromptSubmit");
    assert_eq!(lines[0]["payload"]["prompt_length"], 26);
    assert_eq!(lines[0]["payload"]["source"], "remote");
    assert!(lines[0]["payload"].get("prompt").is_none());
}

#[tokio::test]
async fn test_prompt_without_remote_is_local() {
    let dir = TempDir::new().unwrap();
    let coordinator = coordinator(None, &dir.path().join("audit.jsonl"));

    let prompt = input(json!({"prompt": "deploy the application to production"}));
    let verdict = coordinator.evaluate_prompt(&prompt).await;
    assert_eq!(verdict.source, DecisionSource::Local);
    assert_eq!(verdict.classification.risk_tier, RiskTier::High);
}

#[tokio::test]
async fn test_stop_passes_remote_answer_through() {
    let server = MockServer::start().await;
    let answer = json!({"decision": "block", "reason": "attach test output first"});
    Mock::given(method("POST"))
        .and(path("/hooks/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&answer))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let coordinator = coordinator(Some(&server.uri()), &dir.path().join("audit.jsonl"));

    let stop = input(json!({"hook_event_name": "Stop", "last_assistant_message": "done"}));
    let response = coordinator.handle(HookEvent::Stop, &stop).await;
    assert_eq!(response, HookResponse::Json(answer));
}

#[tokio::test]
async fn test_lifecycle_events_ignore_remote_answers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"hookSpecificOutput": {"additionalContext": "ignored"}})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Cargo.toml"), "[package]\n").unwrap();
    let audit = dir.path().join("audit.jsonl");
    let coordinator = coordinator(Some(&server.uri()), &audit);

    let start = input(json!({
        "hook_event_name": "SessionStart",
        "source": "resume",
        "cwd": dir.path().to_string_lossy(),
    }));
    let banner = coordinator.handle(HookEvent::SessionStart, &start).await;
    let text = banner.render().unwrap();
    assert!(text.contains("rust"));
    assert!(!text.contains("ignored"));

    let compact = coordinator
        .handle(HookEvent::PreCompact, &input(json!({"trigger": "manual"})))
        .await;
    assert!(matches!(compact, HookResponse::Text(_)));

    let end = coordinator
        .handle(HookEvent::SessionEnd, &input(json!({"reason": "logout"})))
        .await;
    assert!(end.is_empty());

    let kinds: Vec<_> = audit_lines(&audit)
        .iter()
        .map(|line| line["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["SessionStart", "PreCompact", "SessionEnd"]);

    let received = server.received_requests().await.unwrap();
    let paths: Vec<_> = received.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        paths,
        vec!["/hooks/session-start", "/hooks/pre-compact", "/hooks/session-end"]
    );
}

#[tokio::test]
async fn test_post_tool_events_never_reach_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let coordinator = coordinator(Some(&server.uri()), &dir.path().join("audit.jsonl"));

    let post = input(json!({
        "hook_event_name": "PostToolUse",
        "tool_name": "Bash",
        "tool_input": {"command": "cargo test"},
    }));
    let response = coordinator.handle(HookEvent::PostToolUse, &post).await;
    assert!(response.as_json().is_some());

    let failure = input(json!({
        "hook_event_name": "PostToolUseFailure",
        "tool_name": "Bash",
        "tool_input": {"command": "cargo build"},
        "error": "error[E0308]: mismatched types",
    }));
    let response = coordinator.handle(HookEvent::PostToolUseFailure, &failure).await;
    assert!(response.as_json().is_some());
}

#[tokio::test]
async fn test_unwritable_audit_does_not_block_decisions() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let coordinator = coordinator(None, &blocker.join("audit.jsonl"));

    let verdict = coordinator.evaluate_action(&bash("rm -rf /")).await;
    assert_eq!(verdict.decision.effective(), Decision::Deny);

    let response = coordinator
        .handle(HookEvent::PreCompact, &input(json!({})))
        .await;
    assert!(!response.is_empty());
}

#[test]
fn test_held_audit_lock_does_not_block_decisions() {
    let dir = TempDir::new().unwrap();
    let audit = dir.path().join("audit.jsonl");
    let holder = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&audit)
        .unwrap();
    holder.lock_exclusive().unwrap();

    let (tx, rx) = mpsc::channel();
    let path = audit.clone();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let verdict = runtime.block_on(coordinator(None, &path).evaluate_action(&bash("rm -rf /")));
        let _ = tx.send(verdict);
    });

    let verdict = rx.recv_timeout(Duration::from_secs(3)).unwrap();
    assert_eq!(verdict.decision.effective(), Decision::Deny);
    assert_eq!(verdict.source, DecisionSource::Local);

    holder.unlock().unwrap();
    assert!(audit_lines(&audit).is_empty());
}
