//! `aletheia hook`: handle one event from the host.

use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use aletheia_core::{HookEvent, HookInput};
use aletheia_hooks::HookResponse;
use anyhow::{Context, Result};
use tracing::debug;

use crate::{config_bridge, init_logging, load_config};

const ACTIVE_MARKER: &str = "export ALETHEIA_ACTIVE=1\n";

/// Read the payload from stdin, handle it, and write the response to stdout.
pub(crate) async fn run(
    event: Option<HookEvent>,
    config_dir: Option<&Path>,
    env_file: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read hook payload from stdin")?;
    let input = HookInput::parse(&raw);

    let event = event
        .or_else(|| input.event())
        .context("no event given and the payload has no known hook_event_name")?;

    let workspace_root = input
        .cwd()
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok());
    let resolved = load_config(workspace_root.as_deref(), config_dir)?;
    init_logging(&resolved, verbose);

    let coordinator = config_bridge::build_coordinator(&resolved)?;
    let response = coordinator.handle(event, &input).await;

    if event == HookEvent::SessionStart
        && let Some(path) = env_file
    {
        mark_session_active(path);
    }

    let mut stdout = io::stdout().lock();
    write_response(&response, &mut stdout).context("failed to write hook response")?;
    Ok(())
}

/// Write a response in the host's format.
fn write_response(response: &HookResponse, out: &mut impl Write) -> io::Result<()> {
    if let Some(text) = response.render() {
        out.write_all(text.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

/// Append the session marker to the host's env file. Best-effort.
fn mark_session_active(path: &Path) -> bool {
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(ACTIVE_MARKER.as_bytes()));
    if let Err(e) = &result {
        debug!(path = %path.display(), error = %e, "Could not write session env file");
    }
    result.is_ok()
}
