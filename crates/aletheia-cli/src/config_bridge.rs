//! Bridge from `aletheia_config::Config` to domain types.
//!
//! The configuration crate knows nothing about the crates it configures;
//! every conversion lives here so the binary is the only place both meet.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use aletheia_audit::{AuditSink, JsonlAuditSink, NullAuditSink};
use aletheia_config::{Config, ResolvedConfig};
use aletheia_gate::GateConfig;
use aletheia_hooks::DecisionCoordinator;
use aletheia_patterns::{PatternCatalog, PatternResult, RuleSpec, Severity};
use aletheia_remote::{HttpRemoteClient, RemoteConfig, RemoteTimeouts};
use aletheia_telemetry::{LogConfig, LogFormat, LogTarget};
use anyhow::{Context, Result};
use tracing::debug;

/// Convert config to [`LogConfig`].
pub fn to_log_config(cfg: &Config) -> LogConfig {
    let format = match cfg.logging.format.as_str() {
        "pretty" => LogFormat::Pretty,
        "json" => LogFormat::Json,
        "full" => LogFormat::Full,
        _ => LogFormat::Compact,
    };

    let target = match (cfg.logging.target.as_str(), cfg.logging.directory.as_deref()) {
        ("stdout", _) => LogTarget::Stdout,
        ("file", Some(dir)) => LogTarget::File(PathBuf::from(dir)),
        _ => LogTarget::Stderr,
    };

    let mut log_config = LogConfig::new(cfg.logging.level.to_ascii_lowercase())
        .with_format(format)
        .with_target(target);

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}

/// Convert config to [`RemoteConfig`].
pub fn to_remote_config(cfg: &Config) -> RemoteConfig {
    RemoteConfig {
        base_url: cfg.remote.url.clone(),
        timeouts: RemoteTimeouts {
            action: Duration::from_millis(cfg.remote.action_timeout_ms),
            lifecycle: Duration::from_millis(cfg.remote.lifecycle_timeout_ms),
        },
    }
}

/// Convert config to [`GateConfig`].
pub fn to_gate_config(cfg: &Config) -> GateConfig {
    GateConfig {
        shell_tools: cfg.gate.shell_tools.clone(),
        external_tool_prefix: cfg.gate.external_tool_prefix.clone(),
    }
}

/// Convert `[[patterns.extra]]` entries to rule specs.
///
/// # Errors
///
/// Fails on an unknown category or severity.
pub fn to_rule_specs(cfg: &Config) -> PatternResult<Vec<RuleSpec>> {
    cfg.patterns
        .extra
        .iter()
        .map(|extra| {
            let mut spec = RuleSpec::new(
                extra.id.clone(),
                extra.category.parse()?,
                extra.pattern.clone(),
                extra.message.clone(),
            );
            spec.severity = extra.severity.as_deref().map(str::parse::<Severity>).transpose()?;
            Ok(spec)
        })
        .collect()
}

/// Compile the pattern catalog: built-in tables (unless disabled) plus extra rules.
///
/// # Errors
///
/// Any rule that fails to compile is fatal.
pub fn build_catalog(cfg: &Config) -> PatternResult<PatternCatalog> {
    let mut builder = PatternCatalog::builder();
    if cfg.patterns.builtin {
        builder = builder.with_builtin();
    }
    builder.rules(to_rule_specs(cfg)?).build()
}

/// Audit sink for the resolved configuration.
pub fn build_audit_sink(resolved: &ResolvedConfig) -> Arc<dyn AuditSink> {
    match resolved.audit_path() {
        Some(path) => {
            debug!(path = %path.display(), "Audit log enabled");
            Arc::new(JsonlAuditSink::new(path))
        },
        None => Arc::new(NullAuditSink),
    }
}

/// Assemble a coordinator from the resolved configuration.
///
/// # Errors
///
/// Fails if the catalog does not compile or the remote URL is invalid.
pub fn build_coordinator(resolved: &ResolvedConfig) -> Result<DecisionCoordinator> {
    let cfg = &resolved.config;
    let catalog = build_catalog(cfg).context("failed to compile pattern catalog")?;

    let remote_config = to_remote_config(cfg);
    let remote =
        HttpRemoteClient::new(&remote_config).context("failed to build remote authority client")?;

    Ok(DecisionCoordinator::new(Arc::new(catalog))
        .with_gate_config(to_gate_config(cfg))
        .with_remote(Arc::new(remote), remote_config.timeouts)
        .with_audit(build_audit_sink(resolved)))
}
