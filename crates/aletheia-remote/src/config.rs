//! Remote endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-route timeout budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTimeouts {
    /// Per-action and per-prompt routes; these sit on the hot path.
    pub action: Duration,
    /// Session-lifecycle routes, where a short block is acceptable.
    pub lifecycle: Duration,
}

impl RemoteTimeouts {
    /// Default hot-path budget.
    pub const DEFAULT_ACTION: Duration = Duration::from_millis(350);
    /// Default lifecycle budget.
    pub const DEFAULT_LIFECYCLE: Duration = Duration::from_millis(1000);

    /// Budget for a route.
    #[must_use]
    pub fn for_route(&self, lifecycle: bool) -> Duration {
        if lifecycle { self.lifecycle } else { self.action }
    }
}

impl Default for RemoteTimeouts {
    fn default() -> Self {
        Self {
            action: Self::DEFAULT_ACTION,
            lifecycle: Self::DEFAULT_LIFECYCLE,
        }
    }
}

/// Where the remote authority lives, if anywhere.
///
/// Built once at startup and passed to the client; nothing reads the process
/// environment at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL, e.g. `http://127.0.0.1:8787`. `None` disables the remote.
    pub base_url: Option<String>,
    /// Timeout budget.
    pub timeouts: RemoteTimeouts,
}

impl RemoteConfig {
    /// Configuration pointing at `base_url`.
    #[must_use]
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            timeouts: RemoteTimeouts::default(),
        }
    }

    /// Override the timeout budget.
    #[must_use]
    pub fn timeouts(mut self, timeouts: RemoteTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Configured base URL, ignoring blank values.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
