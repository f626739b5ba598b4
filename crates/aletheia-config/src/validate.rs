//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound for any remote timeout.
pub const MAX_TIMEOUT_MS: u64 = 10_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json", "full"];
const LOG_TARGETS: &[&str] = &["stdout", "stderr", "file"];
const CATEGORIES: &[&str] = &[
    "destructive",
    "high-risk-command",
    "sensitive-path",
    "high-risk-topic",
    "low-risk-topic",
];
const SEVERITIES: &[&str] = &["low", "medium", "high", "critical"];

/// Validate a fully merged configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_remote(config)?;
    validate_logging(config)?;
    validate_gate(config)?;
    validate_patterns(config)?;
    Ok(())
}

fn validate_timeout(field: &str, ms: u64) -> ConfigResult<()> {
    if ms == 0 || ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::invalid(
            field,
            format!("{ms} ms is out of range; must be between 1 and {MAX_TIMEOUT_MS}"),
        ));
    }
    Ok(())
}

fn validate_remote(config: &Config) -> ConfigResult<()> {
    let r = &config.remote;
    validate_timeout("remote.action_timeout_ms", r.action_timeout_ms)?;
    validate_timeout("remote.lifecycle_timeout_ms", r.lifecycle_timeout_ms)?;

    if let Some(url) = r.url.as_deref().map(str::trim)
        && !url.is_empty()
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::invalid(
            "remote.url",
            format!("'{url}' must start with http:// or https://"),
        ));
    }
    Ok(())
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> ConfigResult<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::invalid(
        field,
        format!("unsupported value '{value}'; expected one of: {}", allowed.join(", ")),
    ))
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;
    one_of("logging.level", &l.level.to_ascii_lowercase(), LOG_LEVELS)?;
    one_of("logging.format", &l.format, LOG_FORMATS)?;
    one_of("logging.target", &l.target, LOG_TARGETS)?;

    if l.target == "file" && l.directory.as_deref().is_none_or(|d| d.trim().is_empty()) {
        return Err(ConfigError::invalid(
            "logging.directory",
            "required when logging.target is 'file'",
        ));
    }
    Ok(())
}

fn validate_gate(config: &Config) -> ConfigResult<()> {
    let g = &config.gate;
    if g.external_tool_prefix.trim().is_empty() {
        return Err(ConfigError::invalid(
            "gate.external_tool_prefix",
            "must not be empty",
        ));
    }
    if g.shell_tools.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::invalid(
            "gate.shell_tools",
            "tool names must not be empty",
        ));
    }
    Ok(())
}

fn validate_patterns(config: &Config) -> ConfigResult<()> {
    for (i, rule) in config.patterns.extra.iter().enumerate() {
        let field = format!("patterns.extra[{i}]");
        if rule.id.trim().is_empty() {
            return Err(ConfigError::invalid(format!("{field}.id"), "must not be empty"));
        }
        if rule.pattern.trim().is_empty() {
            return Err(ConfigError::invalid(format!("{field}.pattern"), "must not be empty"));
        }
        one_of(&format!("{field}.category"), &rule.category, CATEGORIES)?;
        if let Some(severity) = &rule.severity {
            one_of(&format!("{field}.severity"), severity, SEVERITIES)?;
        }
    }
    Ok(())
}
