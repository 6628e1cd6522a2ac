//! Configuration loader for environment variables and CLI overrides.
//!
//! Responsibilities:
//! - Load connection settings from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical merging.
//!
//! Does NOT handle:
//! - Persisting UI state back to disk (see `persistence.rs`).
//!
//! Invariants / Assumptions:
//! - CLI overrides take precedence over environment variables, which take
//!   precedence over defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` loading.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig};

/// Environment variable for the backend base URL.
pub const ENV_BASE_URL: &str = "CLEANROOM_BASE_URL";
/// Environment variable for the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CLEANROOM_TIMEOUT_SECS";
/// Environment variable for the retry budget.
pub const ENV_MAX_RETRIES: &str = "CLEANROOM_MAX_RETRIES";

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Configuration loader that builds config from env vars and overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the `.env` file is
    /// not loaded (useful for testing).
    pub fn load_dotenv(self) -> Self {
        let disabled = std::env::var("DOTENV_DISABLED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        if !disabled {
            dotenvy::dotenv().ok();
        }
        self
    }

    /// Read overrides from `CLEANROOM_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var(ENV_BASE_URL)
            && !url.trim().is_empty()
        {
            self.base_url = Some(url);
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_TIMEOUT_SECS.to_string(),
                message: format!("expected integer seconds, got '{raw}'"),
            })?;
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    var: ENV_TIMEOUT_SECS.to_string(),
                    message: format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
                });
            }
            self.timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(raw) = std::env::var(ENV_MAX_RETRIES) {
            let retries: usize = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_MAX_RETRIES.to_string(),
                message: format!("expected integer, got '{raw}'"),
            })?;
            self.max_retries = Some(retries);
        }

        Ok(self)
    }

    /// Apply a CLI base-URL override (highest precedence).
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url
            && !url.trim().is_empty()
        {
            self.base_url = Some(url);
        }
        self
    }

    /// Build the final configuration, validating the base URL.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                timeout: self
                    .timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
                max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            },
        })
    }
}
