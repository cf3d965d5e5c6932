//! Error types for reachability probes.

use thiserror::Error;

/// Why a probe resolved to "unreachable".
///
/// These never leave the probe boundary: [`super::Probe::probe`] collapses
/// every variant to `false`. They exist so the cause can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Deadline elapsed before a response arrived
    #[error("probe timed out after {0}ms")]
    Timeout(u64),

    /// Connection refused, DNS failure, TLS failure, reset, ...
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived with a non-2xx status
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Probe URL could not be parsed
    #[error("invalid probe URL: {0}")]
    InvalidUrl(String),
}

impl ProbeError {
    /// Short label used for metrics and structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Timeout(_) => "timeout",
            ProbeError::Network(_) => "network",
            ProbeError::Http(_) => "http",
            ProbeError::InvalidUrl(_) => "invalid_url",
        }
    }
}
