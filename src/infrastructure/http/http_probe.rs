//! Reachability probe issuing HEAD requests with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::availability::ReachabilityProbe;
use crate::error::AppError;

/// Default per-request timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// [`ReachabilityProbe`] sending a `HEAD` request to the target URL.
///
/// Redirects are followed. A final status in `200..=399` counts as accessible;
/// any other status, a timeout or a transport error counts as inaccessible.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Builds a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("linkwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::internal(format!("Failed to build HTTP client: {e}"), json!({}))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn is_accessible(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url, status = status.as_u16(), "Probe answered");
                (200..400).contains(&status.as_u16())
            }
            Err(e) => {
                debug!(url, error = %e, timeout = e.is_timeout(), "Probe failed");
                false
            }
        }
    }
}
