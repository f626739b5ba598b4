//! `aletheia config`: inspect the layered configuration.

use std::path::Path;

use aletheia_config::ResolvedConfig;
use aletheia_config::env::known_env_vars;
use aletheia_config::loader::default_config_dir;
use anyhow::{Result, anyhow};

use crate::{ConfigFormat, config_bridge, load_config};

/// `aletheia config show`.
pub(crate) fn show(resolved: &ResolvedConfig, format: ConfigFormat) -> Result<()> {
    let text = match format {
        ConfigFormat::Toml => resolved
            .show_toml()
            .map_err(|_| anyhow!("failed to render configuration as TOML"))?,
        ConfigFormat::Json => resolved.show_json()?,
    };
    println!("{text}");
    Ok(())
}

/// `aletheia config validate`.
///
/// Also compiles the pattern catalog, since extra rules are only checked
/// for well-formedness by the loader.
pub(crate) fn validate(workspace_root: Option<&Path>, config_dir: Option<&Path>) -> Result<()> {
    let resolved = load_config(workspace_root, config_dir)?;
    let catalog = config_bridge::build_catalog(&resolved.config)?;

    for file in &resolved.loaded_files {
        println!("loaded: {file}");
    }
    println!("Configuration is valid ({} pattern rules).", catalog.len());
    Ok(())
}

/// `aletheia config paths`.
pub(crate) fn paths(workspace_root: Option<&Path>, config_dir: Option<&Path>) -> Result<()> {
    let user_dir = match config_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_config_dir()?,
    };

    println!("user:      {}", user_dir.join("config.toml").display());
    if let Some(root) = workspace_root {
        println!(
            "workspace: {}",
            root.join(".aletheia").join("config.toml").display()
        );
    }
    println!("env:       {}", known_env_vars().join(", "));

    if let Ok(resolved) = load_config(workspace_root, Some(&user_dir)) {
        match resolved.audit_path() {
            Some(path) => println!("audit:     {}", path.display()),
            None => println!("audit:     disabled"),
        }
    }
    Ok(())
}
