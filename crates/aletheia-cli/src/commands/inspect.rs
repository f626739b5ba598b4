//! Diagnostic commands: classify a prompt, check an action, list the catalog.

use std::sync::Arc;

use aletheia_config::ResolvedConfig;
use aletheia_core::{ActionRequest, PromptRequest};
use aletheia_gate::{Classifier, Evaluation, GateDecisionEngine};
use aletheia_patterns::{PatternCatalog, PatternCategory};
use anyhow::{Context, Result, bail};
use serde_json::{Map, Value, json};

use crate::OutputFormat;
use crate::config_bridge;

fn catalog_for(resolved: &ResolvedConfig) -> Result<Arc<PatternCatalog>> {
    let catalog =
        config_bridge::build_catalog(&resolved.config).context("failed to compile pattern catalog")?;
    Ok(Arc::new(catalog))
}

/// `aletheia classify`.
pub(crate) fn classify(resolved: &ResolvedConfig, text: &str, format: OutputFormat) -> Result<()> {
    let classifier = Classifier::new(catalog_for(resolved)?);
    let (classification, rule) = classifier.explain(&PromptRequest::new(text));

    match format {
        OutputFormat::Json => {
            let out = json!({
                "classification": classification,
                "rule": rule.map(|r| r.id()),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        },
        OutputFormat::Pretty => {
            println!("{classification}");
            if let Some(rule) = rule {
                println!("matched: {} ({})", rule.id(), rule.message());
            }
        },
    }
    Ok(())
}

/// Tool parameters from `--command` or `--input`.
fn parameters(command: Option<String>, input: Option<&str>) -> Result<Map<String, Value>> {
    if let Some(raw) = input {
        let value: Value = serde_json::from_str(raw).context("--input is not valid JSON")?;
        let Value::Object(map) = value else {
            bail!("--input must be a JSON object");
        };
        return Ok(map);
    }
    let mut map = Map::new();
    if let Some(command) = command {
        map.insert("command".to_string(), Value::String(command));
    }
    Ok(map)
}

/// `aletheia check`.
pub(crate) fn check(
    resolved: &ResolvedConfig,
    tool: &str,
    command: Option<String>,
    input: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let engine = GateDecisionEngine::with_config(
        catalog_for(resolved)?,
        config_bridge::to_gate_config(&resolved.config),
    );
    let action = ActionRequest::new(tool, parameters(command, input)?);
    let evaluation = engine.evaluate_traced(&action);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&evaluation_json(&evaluation))?),
        OutputFormat::Pretty => print!("{}", evaluation_text(&evaluation)),
    }
    Ok(())
}

fn evaluation_json(evaluation: &Evaluation) -> Value {
    json!({
        "decision": evaluation.decision.effective(),
        "gate": evaluation.gate,
        "rule": evaluation.rule_id,
        "reason": evaluation.decision.reason,
        "context": evaluation.decision.additional_context,
    })
}

fn evaluation_text(evaluation: &Evaluation) -> String {
    let mut text = format!("decision: {}\n", evaluation.decision.effective());
    if let Some(gate) = evaluation.gate {
        text.push_str(&format!("gate: {gate}\n"));
    }
    if let Some(rule) = &evaluation.rule_id {
        text.push_str(&format!("rule: {rule}\n"));
    }
    if let Some(reason) = &evaluation.decision.reason {
        text.push_str(&format!("reason: {reason}\n"));
    }
    text
}

/// `aletheia catalog`.
pub(crate) fn catalog(resolved: &ResolvedConfig, category: Option<&str>) -> Result<()> {
    let catalog = catalog_for(resolved)?;
    let filter = category.map(str::parse::<PatternCategory>).transpose()?;

    println!("# catalog version {} ({} rules)", catalog.version(), catalog.len());
    for rule in catalog.iter() {
        if filter.is_some_and(|c| c != rule.category()) {
            continue;
        }
        println!(
            "{:<28} {:<18} {:<8} {}",
            rule.id(),
            rule.category().as_str(),
            rule.severity(),
            rule.pattern()
        );
    }
    Ok(())
}
