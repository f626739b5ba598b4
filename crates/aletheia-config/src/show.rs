//! Resolved configuration and source-annotated display.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::merge::FieldSources;
use crate::types::Config;

/// File name of the default audit log.
pub const DEFAULT_AUDIT_FILE: &str = "events.jsonl";

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final merged configuration.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// Config file paths that were loaded, in precedence order.
    pub loaded_files: Vec<String>,
    /// User configuration directory.
    pub config_dir: PathBuf,
}

impl ResolvedConfig {
    /// Where audit events go, or `None` when auditing is disabled.
    ///
    /// Relative paths resolve against [`Self::config_dir`].
    #[must_use]
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.config.audit.enabled {
            return None;
        }
        let path = match self.config.audit.path.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => {
                let p = Path::new(p);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    self.config_dir.join(p)
                }
            },
            _ => self.config_dir.join(DEFAULT_AUDIT_FILE),
        };
        Some(path)
    }

    /// Render the configuration as TOML with each leaf's source layer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn show_toml(&self) -> Result<String, fmt::Error> {
        let value = toml::Value::try_from(&self.config).map_err(|_| fmt::Error)?;
        let table = value.as_table().ok_or(fmt::Error)?;

        let mut output = String::new();
        writeln!(output, "# Resolved Aletheia configuration")?;
        for file in &self.loaded_files {
            writeln!(output, "# loaded: {file}")?;
        }

        for (section, body) in table {
            let Some(body) = body.as_table() else {
                continue;
            };
            writeln!(output, "\n[{section}]")?;
            for (key, val) in body {
                let path = format!("{section}.{key}");
                let source = self
                    .field_sources
                    .get(&path)
                    .map_or_else(|| "defaults".to_owned(), ToString::to_string);
                writeln!(output, "{key} = {val}  # [{source}]")?;
            }
        }
        Ok(output)
    }

    /// Render the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn show_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.config)
    }
}
