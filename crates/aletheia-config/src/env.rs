//! Environment variable fallbacks.
//!
//! Environment variables are a fallback, not an override: they only fill in
//! fields that no config file set. The environment is read once, by
//! [`collect_env_vars`], and passed explicitly from there on.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "ALETHEIA_DAEMON_URL",
        field_path: "remote.url",
    },
    EnvMapping {
        var_name: "ALETHEIA_REMOTE_TIMEOUT_MS",
        field_path: "remote.action_timeout_ms",
    },
    EnvMapping {
        var_name: "ALETHEIA_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "ALETHEIA_AUDIT_PATH",
        field_path: "audit.path",
    },
];

/// Names of every environment variable the loader consults.
#[must_use]
pub fn known_env_vars() -> Vec<&'static str> {
    ENV_MAPPINGS.iter().map(|m| m.var_name).collect()
}

/// Snapshot the relevant part of the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("ALETHEIA_"))
        .collect()
}

/// Apply fallbacks to fields that only the defaults (or nothing) set.
///
/// Returns the number of variables applied.
pub fn apply_env_fallbacks<S: BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let set_by_file = sources
            .get(mapping.field_path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults);
        if set_by_file {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );
            set_field(merged, mapping.field_path, coerce(val));
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        }
    }

    count
}

/// Integers stay integers so numeric fields deserialize; everything else is a string.
fn coerce(val: &str) -> toml::Value {
    val.trim()
        .parse::<i64>()
        .map_or_else(|_| toml::Value::String(val.to_owned()), toml::Value::Integer)
}

fn set_field(root: &mut toml::Value, path: &str, val: toml::Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry((*segment).to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
    if let Some(table) = current.as_table_mut() {
        table.insert((*last).to_owned(), val);
    }
}
