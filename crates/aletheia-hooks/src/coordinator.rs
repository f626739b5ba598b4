//! Per-event coordination: remote authority first, local logic as fallback.
//!
//! Every handler records exactly one audit event through a best-effort sink,
//! whichever path produced the answer. Nothing in here returns an error: a
//! remote miss falls back to local logic and an audit failure is logged and
//! dropped.

use std::path::Path;
use std::sync::Arc;

use aletheia_audit::{AuditEvent, AuditSink, NullAuditSink, record_best_effort};
use aletheia_core::{Classification, GateDecision, HookEvent, HookInput, HookOutput};
use aletheia_gate::{Classifier, GateConfig, GateDecisionEngine};
use aletheia_patterns::PatternCatalog;
use aletheia_remote::{DisabledRemote, RemoteAuthority, RemoteOutcome, RemoteTimeouts};
use aletheia_telemetry::EvaluationContext;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{Instrument, debug, info};

use crate::advisory;
use crate::response::HookResponse;
use crate::stack;

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    /// The remote authority answered with a well-formed override.
    Remote,
    /// Local heuristics.
    Local,
}

impl DecisionSource {
    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

/// Outcome of a pre-tool-use evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionVerdict {
    /// The effective decision.
    pub decision: GateDecision,
    /// Where it came from.
    pub source: DecisionSource,
    /// What goes back to the host. A remote override is passed through verbatim.
    pub response: HookResponse,
}

/// Outcome of a prompt evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptVerdict {
    /// The effective classification.
    pub classification: Classification,
    /// Where it came from.
    pub source: DecisionSource,
    /// Preflight guidance for the host.
    pub response: HookResponse,
}

/// Coordinates classification, gating, the remote authority and auditing.
///
/// Holds only shared, read-only state; one instance serves any number of
/// concurrent evaluations.
pub struct DecisionCoordinator {
    classifier: Classifier,
    engine: GateDecisionEngine,
    remote: Arc<dyn RemoteAuthority>,
    timeouts: RemoteTimeouts,
    audit: Arc<dyn AuditSink>,
}

impl std::fmt::Debug for DecisionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionCoordinator")
            .field("gate", self.engine.config())
            .field("remote_configured", &self.remote.is_configured())
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl DecisionCoordinator {
    /// Local-only coordinator: no remote authority, audit events discarded.
    #[must_use]
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&catalog)),
            engine: GateDecisionEngine::new(catalog),
            remote: Arc::new(DisabledRemote),
            timeouts: RemoteTimeouts::default(),
            audit: Arc::new(NullAuditSink),
        }
    }

    /// Use explicit tool shapes for gating and advisories.
    #[must_use]
    pub fn with_gate_config(mut self, config: GateConfig) -> Self {
        let catalog = Arc::clone(self.classifier.catalog());
        self.engine = GateDecisionEngine::with_config(catalog, config);
        self
    }

    /// Consult `remote` before local logic, within `timeouts`.
    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn RemoteAuthority>, timeouts: RemoteTimeouts) -> Self {
        self.remote = remote;
        self.timeouts = timeouts;
        self
    }

    /// Record audit events to `sink`.
    #[must_use]
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// The local gate engine.
    #[must_use]
    pub fn engine(&self) -> &GateDecisionEngine {
        &self.engine
    }

    /// The local classifier.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Handle one hook event end to end.
    pub async fn handle(&self, event: HookEvent, input: &HookInput) -> HookResponse {
        let mut context = EvaluationContext::new(event.wire_name());
        if matches!(
            event,
            HookEvent::PreToolUse | HookEvent::PostToolUse | HookEvent::PostToolUseFailure
        ) {
            context = context.with_tool(input.tool_name());
        }
        if let Some(session) = input.str_field("session_id") {
            context = context.with_session_id(session);
        }

        let span = context.span();
        async {
            let response = match event {
                HookEvent::PreToolUse => self.evaluate_action(input).await.response,
                HookEvent::UserPromptSubmit => self.evaluate_prompt(input).await.response,
                HookEvent::SessionStart => self.session_start(input).await,
                HookEvent::SessionEnd => self.session_end(input).await,
                HookEvent::Stop => self.stop(input).await,
                HookEvent::PreCompact => self.pre_compact(input).await,
                HookEvent::PostToolUse => self.post_tool_use(input),
                HookEvent::PostToolUseFailure => self.post_tool_use_failure(input),
            };
            debug!(
                elapsed_ms = context.elapsed_ms(),
                responded = !response.is_empty(),
                "Event handled"
            );
            response
        }
        .instrument(span)
        .await
    }

    /// Decide on a proposed tool call.
    ///
    /// A remote override is trusted only if it carries a well-typed
    /// `hookSpecificOutput` with a `permissionDecision`; it is then returned
    /// verbatim.
    pub async fn evaluate_action(&self, input: &HookInput) -> ActionVerdict {
        let event = HookEvent::PreToolUse;
        let outcome = self.consult(event, &action_payload(input)).await;

        let verdict = match outcome
            .into_override()
            .and_then(|map| HookOutput::from_untrusted(&map).map(|output| (map, output)))
        {
            Some((map, output)) => ActionVerdict {
                decision: output.to_gate_decision(),
                source: DecisionSource::Remote,
                response: HookResponse::Json(Value::Object(map)),
            },
            None => {
                let decision = self.engine.evaluate(&input.to_action_request());
                let response = HookResponse::from_output(&HookOutput::from_gate(event, &decision));
                ActionVerdict {
                    decision,
                    source: DecisionSource::Local,
                    response,
                }
            },
        };

        info!(
            tool = %input.tool_name(),
            decision = %verdict.decision.effective(),
            source = verdict.source.as_str(),
            "Action evaluated"
        );
        self.record(
            event,
            json!({
                "input": input.to_value(),
                "decision": verdict.decision,
                "source": verdict.source,
            }),
        );
        verdict
    }

    /// Classify a submitted prompt and produce preflight guidance.
    ///
    /// A remote override must carry a `classification` whose labels parse.
    pub async fn evaluate_prompt(&self, input: &HookInput) -> PromptVerdict {
        let event = HookEvent::UserPromptSubmit;
        let prompt = input.to_prompt_request();
        let local = self.classifier.classify(&prompt);

        let payload = json!({ "prompt": prompt.text, "classification": local });
        let remote = self
            .consult(event, &payload)
            .await
            .as_override()
            .and_then(|map| map.get("classification"))
            .and_then(Classification::from_untrusted);

        let (classification, source) = match remote {
            Some(classification) => (classification, DecisionSource::Remote),
            None => (local, DecisionSource::Local),
        };

        info!(
            risk = %classification.risk_tier,
            source = source.as_str(),
            "Prompt classified"
        );
        self.record(
            event,
            json!({
                "prompt_length": prompt.text.chars().count(),
                "classification": classification,
                "source": source,
            }),
        );

        let response = HookResponse::Text(advisory::preflight(&classification));
        PromptVerdict {
            classification,
            source,
            response,
        }
    }

    /// Session start: detect the repository stack and show the banner.
    pub async fn session_start(&self, input: &HookInput) -> HookResponse {
        let event = HookEvent::SessionStart;
        let source = input.str_field("source").unwrap_or("startup");
        let cwd = input.cwd();
        let detected = cwd.map(|dir| stack::detect_stack(Path::new(dir))).unwrap_or_default();

        self.record(event, json!({ "source": source, "stack": detected }));
        self.consult(event, &json!({ "source": source, "stack": detected, "cwd": cwd }))
            .await;

        HookResponse::Text(advisory::session_banner(source, &stack::describe(&detected)))
    }

    /// Session end: notify the remote authority. Writes nothing.
    pub async fn session_end(&self, input: &HookInput) -> HookResponse {
        let event = HookEvent::SessionEnd;
        let reason = input.str_field("reason").unwrap_or("other");

        self.record(event, json!({ "reason": reason }));
        self.consult(event, &json!({ "reason": reason })).await;
        HookResponse::Empty
    }

    /// Stop: pass a remote answer through, or nudge toward a proof packet.
    pub async fn stop(&self, input: &HookInput) -> HookResponse {
        let event = HookEvent::Stop;
        let payload = input.to_value();
        self.record(event, payload.clone());

        if let Some(map) = self
            .consult(event, &payload)
            .await
            .into_override()
            .filter(|map| !map.is_empty())
        {
            return HookResponse::Json(Value::Object(map));
        }

        let last_message = input.str_field("last_assistant_message").unwrap_or_default();
        if advisory::needs_proof_packet(last_message) {
            HookResponse::from_output(&HookOutput::context(
                event,
                advisory::PROOF_PACKET_REMINDER,
            ))
        } else {
            HookResponse::Empty
        }
    }

    /// Pre-compact: request a structured summary.
    pub async fn pre_compact(&self, input: &HookInput) -> HookResponse {
        let event = HookEvent::PreCompact;
        let trigger = input.str_field("trigger").unwrap_or("auto");

        self.record(event, json!({ "trigger": trigger }));
        self.consult(event, &json!({ "trigger": trigger })).await;
        HookResponse::Text(advisory::COMPACTION_GUIDANCE.to_string())
    }

    /// Post-tool-use: local verification signals only.
    pub fn post_tool_use(&self, input: &HookInput) -> HookResponse {
        let event = HookEvent::PostToolUse;
        self.record(event, input.to_value());

        let action = input.to_action_request();
        match advisory::post_tool_context(&action, self.engine.config()) {
            Some(text) => HookResponse::from_output(&HookOutput::context(event, text)),
            None => HookResponse::Empty,
        }
    }

    /// Post-tool-use failure: local recovery guidance; silent on interrupts.
    pub fn post_tool_use_failure(&self, input: &HookInput) -> HookResponse {
        let event = HookEvent::PostToolUseFailure;
        self.record(event, input.to_value());

        if input.is_interrupt() {
            return HookResponse::Empty;
        }
        let text = advisory::failure_context(
            &input.to_action_request(),
            input.error_text(),
            self.engine.config(),
        );
        HookResponse::from_output(&HookOutput::context(event, text))
    }

    async fn consult(&self, event: HookEvent, payload: &Value) -> RemoteOutcome {
        let Some(route) = event.route() else {
            return RemoteOutcome::NotConfigured;
        };
        if !self.remote.is_configured() {
            return RemoteOutcome::NotConfigured;
        }

        let budget = self.timeouts.for_route(event.is_lifecycle());
        let outcome = self.remote.try_override(route, payload, budget).await;
        if !outcome.is_response() {
            debug!(route = %route, outcome = %outcome, "No remote override, using local logic");
        }
        outcome
    }

    fn record(&self, event: HookEvent, payload: Value) {
        let record = AuditEvent::new(event.wire_name(), payload);
        record_best_effort(self.audit.as_ref(), &record);
    }
}

/// Remote payload for an action: the host payload plus camelCase aliases.
fn action_payload(input: &HookInput) -> Value {
    let mut payload: Map<String, Value> = input.raw().clone();
    payload
        .entry("toolName")
        .or_insert_with(|| Value::String(input.tool_name().to_string()));
    payload
        .entry("toolInput")
        .or_insert_with(|| Value::Object(input.tool_input()));
    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aletheia_audit::{AuditError, AuditResult, MemoryAuditSink};
    use aletheia_core::Decision;
    use aletheia_core::RiskTier;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Remote that answers every route with a fixed outcome and records calls.
    struct FakeRemote {
        outcome: RemoteOutcome,
        calls: Mutex<Vec<(String, Value, Duration)>>,
    }

    impl FakeRemote {
        fn new(outcome: RemoteOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn answering(value: Value) -> Arc<Self> {
            Self::new(RemoteOutcome::Response(value.as_object().cloned().unwrap()))
        }

        fn calls(&self) -> Vec<(String, Value, Duration)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteAuthority for FakeRemote {
        async fn try_override(&self, route: &str, payload: &Value, budget: Duration) -> RemoteOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((route.to_string(), payload.clone(), budget));
            self.outcome.clone()
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    struct BrokenSink;

    impl AuditSink for BrokenSink {
        fn record(&self, _event: &AuditEvent) -> AuditResult<()> {
            Err(AuditError::Unavailable("disk full".to_string()))
        }
    }

    fn catalog() -> Arc<PatternCatalog> {
        Arc::new(PatternCatalog::builtin().unwrap())
    }

    fn coordinator(remote: Arc<dyn RemoteAuthority>, sink: Arc<MemoryAuditSink>) -> DecisionCoordinator {
        DecisionCoordinator::new(catalog())
            .with_remote(remote, RemoteTimeouts::default())
            .with_audit(sink)
    }

    fn local(sink: Arc<MemoryAuditSink>) -> DecisionCoordinator {
        DecisionCoordinator::new(catalog()).with_audit(sink)
    }

    fn input(value: Value) -> HookInput {
        HookInput::new(value.as_object().cloned().unwrap())
    }

    fn bash(command: &str) -> HookInput {
        input(json!({"tool_name": "Bash", "tool_input": {"command": command}}))
    }

    fn context_of(response: &HookResponse) -> Option<&str> {
        response.as_json()?["hookSpecificOutput"]["additionalContext"].as_str()
    }

    #[tokio::test]
    async fn test_local_action_decisions() {
        let sink = Arc::new(MemoryAuditSink::new());
        let c = local(Arc::clone(&sink));

        let deny = c.evaluate_action(&bash("rm -rf /")).await;
        assert_eq!(deny.decision.effective(), Decision::Deny);
        assert_eq!(deny.source, DecisionSource::Local);
        assert_eq!(
            deny.response.as_json().unwrap()["hookSpecificOutput"]["permissionDecision"],
            "deny"
        );

        let ask = c.evaluate_action(&bash("git push origin main")).await;
        assert_eq!(ask.decision.effective(), Decision::Ask);

        let allow = c.evaluate_action(&bash("ls -la")).await;
        assert!(allow.decision.is_empty());
        assert!(allow.response.is_empty());

        assert_eq!(sink.len(), 3);
    }

    #[tokio::test]
    async fn test_remote_action_override_wins() {
        let sink = Arc::new(MemoryAuditSink::new());
        let answer = json!({
            "hookSpecificOutput": {
                "hookEventName": "PreToolUse",
                "permissionDecision": "allow",
                "permissionDecisionReason": "approved by policy"
            },
            "extra": "kept"
        });
        let remote = FakeRemote::answering(answer.clone());
        let c = coordinator(remote.clone(), Arc::clone(&sink));

        let verdict = c.evaluate_action(&bash("rm -rf /")).await;
        assert_eq!(verdict.source, DecisionSource::Remote);
        assert_eq!(verdict.decision.effective(), Decision::Allow);
        assert_eq!(verdict.response, HookResponse::Json(answer));

        let calls = remote.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/hooks/pre-tool-use");
        assert_eq!(calls[0].1["toolName"], "Bash");
        assert_eq!(calls[0].1["toolInput"]["command"], "rm -rf /");
        assert_eq!(calls[0].2, RemoteTimeouts::DEFAULT_ACTION);

        let events = sink.events();
        assert_eq!(events[0].payload["source"], "remote");
    }

    #[tokio::test]
    async fn test_override_without_decision_keeps_local_deny() {
        let sink = Arc::new(MemoryAuditSink::new());
        for answer in [
            json!({"hookSpecificOutput": {"additionalContext": "fyi"}}),
            json!({"hookSpecificOutput": {"permissionDecisionReason": "looks fine"}}),
            json!({"hookSpecificOutput": {}}),
        ] {
            let c = coordinator(FakeRemote::answering(answer), Arc::clone(&sink));
            let verdict = c.evaluate_action(&bash("rm -rf /")).await;
            assert_eq!(verdict.source, DecisionSource::Local);
            assert_eq!(verdict.decision.effective(), Decision::Deny);
            assert_eq!(
                verdict.response.as_json().unwrap()["hookSpecificOutput"]["permissionDecision"],
                "deny"
            );
        }
        assert!(sink.events().iter().all(|e| e.payload["source"] == "local"));
    }

    #[tokio::test]
    async fn test_malformed_action_override_falls_back() {
        let sink = Arc::new(MemoryAuditSink::new());
        for answer in [
            json!({"decision": "allow"}),
            json!({"hookSpecificOutput": {"permissionDecision": "whatever"}}),
            json!({}),
        ] {
            let c = coordinator(FakeRemote::answering(answer), Arc::clone(&sink));
            let verdict = c.evaluate_action(&bash("rm -rf /")).await;
            assert_eq!(verdict.source, DecisionSource::Local);
            assert_eq!(verdict.decision.effective(), Decision::Deny);
        }
    }

    #[tokio::test]
    async fn test_remote_failures_fall_back() {
        for outcome in [
            RemoteOutcome::Timeout,
            RemoteOutcome::ConnectionError("refused".to_string()),
            RemoteOutcome::Status(500),
            RemoteOutcome::EmptyBody,
            RemoteOutcome::ParseError("eof".to_string()),
            RemoteOutcome::NotAnObject,
        ] {
            let sink = Arc::new(MemoryAuditSink::new());
            let c = coordinator(FakeRemote::new(outcome), Arc::clone(&sink));
            let verdict = c.evaluate_action(&bash("git push origin main")).await;
            assert_eq!(verdict.source, DecisionSource::Local);
            assert_eq!(verdict.decision.effective(), Decision::Ask);
            assert_eq!(sink.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_local_prompt_classification() {
        let sink = Arc::new(MemoryAuditSink::new());
        let c = local(Arc::clone(&sink));

        let verdict = c
            .evaluate_prompt(&input(json!({"prompt": "deploy the application to production"})))
            .await;
        assert_eq!(verdict.classification, Classification::high());
        assert_eq!(verdict.source, DecisionSource::Local);
        let HookResponse::Text(text) = &verdict.response else {
            panic!("expected text response");
        };
        assert!(text.starts_with("Preflight: risk=high"));

        let events = sink.events();
        assert_eq!(events[0].kind, "UserPromptSubmit");
        assert_eq!(events[0].payload["prompt_length"], 36);
        assert_eq!(events[0].payload["classification"]["risk"], "high");
        assert!(events[0].payload.get("prompt").is_none());
    }

    #[tokio::test]
    async fn test_remote_prompt_override() {
        let sink = Arc::new(MemoryAuditSink::new());
        let remote = FakeRemote::answering(json!({
            "classification": {"risk": "low", "budget": "lean", "mode": "custom-mode"}
        }));
        let c = coordinator(remote.clone(), sink);

        let verdict = c
            .evaluate_prompt(&input(json!({"prompt": "deploy the application to production"})))
            .await;
        assert_eq!(verdict.source, DecisionSource::Remote);
        assert_eq!(verdict.classification.risk_tier, RiskTier::Low);
        assert_eq!(verdict.classification.mode, "custom-mode");

        let calls = remote.calls();
        assert_eq!(calls[0].0, "/hooks/user-prompt-submit");
        assert_eq!(calls[0].1["prompt"], "deploy the application to production");
        assert_eq!(calls[0].1["classification"]["risk"], "high");
    }

    #[tokio::test]
    async fn test_invalid_prompt_override_ignored() {
        for answer in [
            json!({"classification": {"risk": "extreme", "budget": "lean", "mode": "x"}}),
            json!({"classification": "high"}),
            json!({"risk": "low"}),
        ] {
            let c = coordinator(
                FakeRemote::answering(answer),
                Arc::new(MemoryAuditSink::new()),
            );
            let verdict = c
                .evaluate_prompt(&input(json!({"prompt": "fix the typo in the readme file"})))
                .await;
            assert_eq!(verdict.source, DecisionSource::Local);
            assert_eq!(verdict.classification, Classification::low());
        }
    }

    #[tokio::test]
    async fn test_broken_audit_sink_does_not_affect_decisions() {
        let c = DecisionCoordinator::new(catalog()).with_audit(Arc::new(BrokenSink));
        let verdict = c.evaluate_action(&bash("rm -rf /")).await;
        assert_eq!(verdict.decision.effective(), Decision::Deny);

        let response = c
            .handle(
                HookEvent::UserPromptSubmit,
                &input(json!({"prompt": "add a user login page with email validation"})),
            )
            .await;
        assert!(matches!(response, HookResponse::Text(ref t) if t.contains("risk=medium")));
    }

    #[tokio::test]
    async fn test_every_event_records_once() {
        let sink = Arc::new(MemoryAuditSink::new());
        let c = local(Arc::clone(&sink));
        let payload = input(json!({"tool_name": "Read", "tool_input": {"file_path": "a.rs"}}));

        for event in HookEvent::ALL {
            c.handle(event, &payload).await;
        }

        let kinds: Vec<String> = sink.events().into_iter().map(|e| e.kind).collect();
        let expected: Vec<String> = HookEvent::ALL
            .iter()
            .map(|e| e.wire_name().to_string())
            .collect();
        assert_eq!(kinds, expected);
    }

    #[tokio::test]
    async fn test_session_start_banner_and_remote_notice() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        let sink = Arc::new(MemoryAuditSink::new());
        let remote = FakeRemote::new(RemoteOutcome::Timeout);
        let c = coordinator(remote.clone(), Arc::clone(&sink));

        let cwd = dir.path().to_str().unwrap();
        let response = c
            .session_start(&input(json!({"source": "resume", "cwd": cwd})))
            .await;
        let HookResponse::Text(text) = response else {
            panic!("expected text response");
        };
        assert!(text.starts_with("Aletheia profile resumed. Repo signals: rust."));

        let calls = remote.calls();
        assert_eq!(calls[0].0, "/hooks/session-start");
        assert_eq!(calls[0].1["stack"], json!(["rust"]));
        assert_eq!(calls[0].2, RemoteTimeouts::DEFAULT_LIFECYCLE);
        assert_eq!(sink.events()[0].payload, json!({"source": "resume", "stack": ["rust"]}));
    }

    #[tokio::test]
    async fn test_session_end_is_silent() {
        let remote = FakeRemote::answering(json!({"ok": true}));
        let c = coordinator(remote.clone(), Arc::new(MemoryAuditSink::new()));
        let response = c.session_end(&input(json!({"reason": "logout"}))).await;
        assert!(response.is_empty());
        assert_eq!(remote.calls()[0].1, json!({"reason": "logout"}));
    }

    #[tokio::test]
    async fn test_stop_reminder_and_remote_passthrough() {
        let long = "x".repeat(400);
        let payload = input(json!({"last_assistant_message": long}));

        let c = local(Arc::new(MemoryAuditSink::new()));
        let response = c.stop(&payload).await;
        assert_eq!(context_of(&response), Some(advisory::PROOF_PACKET_REMINDER));

        let short = c.stop(&input(json!({"last_assistant_message": "done"}))).await;
        assert!(short.is_empty());

        let answer = json!({"decision": "block", "reason": "summarize first"});
        let c = coordinator(FakeRemote::answering(answer.clone()), Arc::new(MemoryAuditSink::new()));
        assert_eq!(c.stop(&payload).await, HookResponse::Json(answer));

        let c = coordinator(FakeRemote::answering(json!({})), Arc::new(MemoryAuditSink::new()));
        assert_eq!(
            context_of(&c.stop(&payload).await),
            Some(advisory::PROOF_PACKET_REMINDER)
        );
    }

    #[tokio::test]
    async fn test_pre_compact_guidance() {
        let c = local(Arc::new(MemoryAuditSink::new()));
        let response = c.pre_compact(&input(json!({"trigger": "manual"}))).await;
        assert_eq!(
            response,
            HookResponse::Text(advisory::COMPACTION_GUIDANCE.to_string())
        );
    }

    #[tokio::test]
    async fn test_post_tool_events_stay_local() {
        let remote = FakeRemote::answering(json!({
            "hookSpecificOutput": {"permissionDecision": "deny", "additionalContext": "remote"}
        }));
        let c = coordinator(remote.clone(), Arc::new(MemoryAuditSink::new()));

        let response = c.post_tool_use(&bash("cargo test"));
        assert!(context_of(&response).unwrap().starts_with("Verification signal captured."));

        let failure = input(json!({
            "tool_name": "Bash",
            "tool_input": {"command": "make"},
            "error": "No rule to make target"
        }));
        let response = c.post_tool_use_failure(&failure);
        assert!(context_of(&response).unwrap().contains("Error hint: No rule to make target"));

        let interrupted = input(json!({"tool_name": "Bash", "is_interrupt": true}));
        assert!(c.post_tool_use_failure(&interrupted).is_empty());

        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_custom_gate_config_reaches_advisories() {
        let c = local(Arc::new(MemoryAuditSink::new())).with_gate_config(GateConfig {
            shell_tools: vec!["Shell".to_string()],
            external_tool_prefix: "ext__".to_string(),
        });

        let verdict = c
            .evaluate_action(&input(json!({"tool_name": "Shell", "tool_input": {"command": "rm -rf /"}})))
            .await;
        assert_eq!(verdict.decision.effective(), Decision::Deny);

        let response = c.post_tool_use(&input(json!({"tool_name": "ext__search"})));
        assert!(context_of(&response).unwrap().starts_with("MCP tool returned."));
    }
}
