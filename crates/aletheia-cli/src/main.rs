//! Aletheia CLI - Request-time safety gate for coding agents.
//!
//! The host runs `aletheia hook <event>` for each lifecycle event, writing the
//! event payload to stdin and reading the response from stdout. The remaining
//! subcommands are diagnostics over the same catalog and configuration.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::{Path, PathBuf};

use aletheia_config::ResolvedConfig;
use aletheia_core::HookEvent;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config_bridge;

/// Aletheia - request-time safety gate
#[derive(Parser)]
#[command(name = "aletheia")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// User configuration directory (default: ~/.claude/aletheia)
    #[arg(long, global = true, env = "ALETHEIA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one hook event: payload on stdin, response on stdout
    Hook {
        /// Event slug or name (e.g. pre-tool-use); defaults to the payload's hook_event_name
        #[arg(value_parser = parse_event)]
        event: Option<HookEvent>,

        /// Shell env file to mark the session active (set by the host)
        #[arg(long, env = "CLAUDE_ENV_FILE", hide_env_values = true)]
        env_file: Option<PathBuf>,
    },

    /// Classify a prompt's risk tier
    Classify {
        /// Prompt text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Evaluate a tool call against the gates
    Check {
        /// Tool name
        #[arg(short, long, default_value = "Bash")]
        tool: String,

        /// Shell command (shorthand for --input '{"command": ...}')
        #[arg(short, long, conflicts_with = "input")]
        command: Option<String>,

        /// Tool input as a JSON object
        #[arg(short, long)]
        input: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// List the compiled pattern rules
    Catalog {
        /// Only show one category (e.g. destructive, sensitive-path)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// View and check configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Validate the current configuration
    Validate,
    /// Show config file paths being checked
    Paths,
}

/// Output format for diagnostic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text
    Pretty,
    /// JSON
    Json,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ConfigFormat {
    /// Annotated TOML
    Toml,
    /// JSON
    Json,
}

fn parse_event(s: &str) -> Result<HookEvent, aletheia_core::UnknownEvent> {
    s.parse()
}

/// Load layered configuration for `workspace_root`.
pub(crate) fn load_config(
    workspace_root: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<ResolvedConfig> {
    aletheia_config::loader::load(workspace_root, config_dir).context("failed to load configuration")
}

/// Install the global subscriber; a failure is reported and otherwise ignored.
pub(crate) fn init_logging(resolved: &ResolvedConfig, verbose: bool) {
    let mut log_config = config_bridge::to_log_config(&resolved.config);
    if verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = aletheia_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = cli.config_dir.as_deref();

    match cli.command {
        Commands::Hook { event, env_file } => {
            commands::hook::run(event, config_dir, env_file.as_deref(), cli.verbose).await?;
        },
        Commands::Classify { text, format } => {
            let resolved = load_workspace_config(config_dir, cli.verbose)?;
            commands::inspect::classify(&resolved, &text.join(" "), format)?;
        },
        Commands::Check {
            tool,
            command,
            input,
            format,
        } => {
            let resolved = load_workspace_config(config_dir, cli.verbose)?;
            commands::inspect::check(&resolved, &tool, command, input.as_deref(), format)?;
        },
        Commands::Catalog { category } => {
            let resolved = load_workspace_config(config_dir, cli.verbose)?;
            commands::inspect::catalog(&resolved, category.as_deref())?;
        },
        Commands::Config { command } => {
            let workspace_root = std::env::current_dir().ok();
            match command {
                ConfigCommands::Show { format } => {
                    let resolved = load_config(workspace_root.as_deref(), config_dir)?;
                    commands::config::show(&resolved, format)?;
                },
                ConfigCommands::Validate => {
                    commands::config::validate(workspace_root.as_deref(), config_dir)?;
                },
                ConfigCommands::Paths => {
                    commands::config::paths(workspace_root.as_deref(), config_dir)?;
                },
            }
        },
    }

    Ok(())
}

fn load_workspace_config(config_dir: Option<&Path>, verbose: bool) -> Result<ResolvedConfig> {
    let workspace_root = std::env::current_dir().ok();
    let resolved = load_config(workspace_root.as_deref(), config_dir)?;
    init_logging(&resolved, verbose);
    Ok(resolved)
}
