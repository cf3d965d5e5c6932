//! Configuration module for Zenith
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ZENITH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use zenith::config::ZenithConfig;
//!
//! let toml = r#"
//! [polling]
//! max_attempts = 5
//!
//! [[targets]]
//! key = "chest-xray"
//! probe_url = "http://localhost:5000/health"
//! "#;
//! let config: ZenithConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.polling.max_attempts, 5);
//! assert_eq!(config.polling.base_interval_ms, 5000);
//! assert_eq!(config.targets[0].key, "chest-xray");
//! ```

pub mod error;
pub mod logging;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

pub use crate::health::PollingConfig;
pub use crate::probe::Target;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for the status monitor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ZenithConfig {
    /// Polling schedule
    pub polling: PollingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Monitored services, in display order
    pub targets: Vec<Target>,
}

impl ZenithConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports ZENITH_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("ZENITH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ZENITH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(polling) = std::env::var("ZENITH_POLLING") {
            self.polling.enabled = polling.to_lowercase() == "true";
        }
        if let Ok(base) = std::env::var("ZENITH_BASE_INTERVAL_MS") {
            if let Ok(ms) = base.parse() {
                self.polling.base_interval_ms = ms;
            }
        }
        if let Ok(max) = std::env::var("ZENITH_MAX_ATTEMPTS") {
            if let Ok(n) = max.parse() {
                self.polling.max_attempts = n;
            }
        }
        if let Ok(timeout) = std::env::var("ZENITH_PROBE_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.polling.probe_timeout_ms = ms;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.base_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "polling.base_interval_ms",
                "interval must be non-zero",
            ));
        }
        if self.polling.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "polling.max_attempts",
                "at least one attempt is required",
            ));
        }
        if self.polling.probe_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "polling.probe_timeout_ms",
                "timeout must be non-zero",
            ));
        }

        let mut seen = HashSet::new();
        for (i, target) in self.targets.iter().enumerate() {
            if target.key.is_empty() {
                return Err(ConfigError::invalid(
                    format!("targets[{}].key", i),
                    "key cannot be empty",
                ));
            }
            if !seen.insert(target.key.as_str()) {
                return Err(ConfigError::invalid(
                    format!("targets[{}].key", i),
                    format!("duplicate key '{}'", target.key),
                ));
            }
            validate_probe_url(&target.probe_url)
                .map_err(|message| ConfigError::invalid(format!("targets[{}].probe_url", i), message))?;
        }

        Ok(())
    }
}

fn validate_probe_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }
    let parsed = reqwest::Url::parse(url).map_err(|e| format!("invalid URL: {}", e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
