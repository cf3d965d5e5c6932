//! Single-target reachability probes.
//!
//! A probe issues one bounded request against a target's probe URL and
//! reports whether it answered with a 2xx status in time. Failure causes are
//! classified for logging, then collapsed to `false`.

mod error;


pub use error::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One monitored remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Stable identifier used as the status key
    pub key: String,
    /// URL requested on every probe
    #[serde(alias = "health_endpoint")]
    pub probe_url: String,
}

impl Target {
    pub fn new(key: impl Into<String>, probe_url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            probe_url: probe_url.into(),
        }
    }
}

/// Reachability check for a single target.
///
/// Implementations must never panic or hang past their own deadline; every
/// failure is reported as `false`.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &Target) -> bool;
}

/// HTTP probe with a hard per-request deadline.
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Create a probe with a default pooled HTTP client.
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    /// Create a probe with a custom HTTP client (for testing).
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a target and keep the failure cause.
    ///
    /// The deadline is armed before the request is sent and covers connect,
    /// TLS and response headers. The body is never read.
    pub async fn try_probe(&self, target: &Target) -> Result<(), ProbeError> {
        let url = reqwest::Url::parse(&target.probe_url)
            .map_err(|e| ProbeError::InvalidUrl(e.to_string()))?;
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| ProbeError::Timeout(timeout_ms))?
            .map_err(|e| Self::classify_error(e, timeout_ms))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Http(status.as_u16()))
        }
    }

    /// Classify reqwest error into ProbeError.
    fn classify_error(e: reqwest::Error, timeout_ms: u64) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Timeout(timeout_ms)
        } else {
            ProbeError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &Target) -> bool {
        let start = Instant::now();
        let result = self.try_probe(target).await;

        metrics::histogram!("zenith_probe_duration_seconds",
            "target" => target.key.clone()
        )
        .record(start.elapsed().as_secs_f64());

        match result {
            Ok(()) => {
                metrics::counter!("zenith_probe_total", "outcome" => "reachable").increment(1);
                true
            }
            Err(error) => {
                metrics::counter!("zenith_probe_total", "outcome" => error.kind()).increment(1);
                tracing::debug!(
                    target_key = %target.key,
                    url = %target.probe_url,
                    error = %error,
                    "Probe failed"
                );
                false
            }
        }
    }
}
