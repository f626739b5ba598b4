//! Remote authority clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::outcome::RemoteOutcome;

/// An optional external authority that may override local decisions.
#[async_trait]
pub trait RemoteAuthority: Send + Sync {
    /// Make one bounded attempt on `route`.
    ///
    /// Never fails and never retries; every failure mode is a
    /// [`RemoteOutcome`] variant other than `Response`.
    async fn try_override(&self, route: &str, payload: &Value, budget: Duration) -> RemoteOutcome;

    /// Whether calls can produce anything but [`RemoteOutcome::NotConfigured`].
    fn is_configured(&self) -> bool;
}

/// Remote that is never configured. Calls return immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRemote;

#[async_trait]
impl RemoteAuthority for DisabledRemote {
    async fn try_override(&self, _route: &str, _payload: &Value, _budget: Duration) -> RemoteOutcome {
        RemoteOutcome::NotConfigured
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// JSON-over-HTTP remote: `POST {base_url}{route}` with the payload as body.
#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    client: Client,
    base_url: Option<String>,
}

impl HttpRemoteClient {
    /// Build a client from configuration.
    ///
    /// An absent or blank URL yields an unconfigured client.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidUrl`] for a non-HTTP URL and
    /// [`RemoteError::ClientBuild`] if the HTTP stack fails to initialize.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let base_url = match config.endpoint() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Some(url.trim_end_matches('/').to_string())
            },
            Some(url) => return Err(RemoteError::InvalidUrl(url.to_string())),
            None => None,
        };

        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Configured base URL.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    async fn post(&self, url: &str, payload: &Value, budget: Duration) -> RemoteOutcome {
        let response = match self
            .client
            .post(url)
            .timeout(budget)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return RemoteOutcome::Timeout,
            Err(e) => return RemoteOutcome::ConnectionError(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return RemoteOutcome::Status(status.as_u16());
        }

        match response.text().await {
            Ok(body) => RemoteOutcome::from_body(&body),
            Err(e) if e.is_timeout() => RemoteOutcome::Timeout,
            Err(e) => RemoteOutcome::ConnectionError(e.to_string()),
        }
    }
}

#[async_trait]
impl RemoteAuthority for HttpRemoteClient {
    async fn try_override(&self, route: &str, payload: &Value, budget: Duration) -> RemoteOutcome {
        let Some(base_url) = &self.base_url else {
            return RemoteOutcome::NotConfigured;
        };
        let url = format!("{base_url}{route}");

        // The outer bound also covers DNS resolution and body streaming.
        let outcome = match timeout(budget, self.post(&url, payload, budget)).await {
            Ok(outcome) => outcome,
            Err(_) => RemoteOutcome::Timeout,
        };

        debug!(
            route = %route,
            budget_ms = budget.as_millis(),
            outcome = outcome.label(),
            "Remote authority consulted"
        );
        outcome
    }

    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}
