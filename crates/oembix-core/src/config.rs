//! Configuration management
//!
//! Strongly-typed configuration with TOML support, consumed by the CLI and
//! by [`crate::Pipeline::from_config`] / [`crate::HttpFetcher::from_config`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::{Error, Result};
use crate::whitelist::SUGGESTED_WHITELIST;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whitelist guard settings
    pub whitelist: WhitelistConfig,

    /// Fetch primitive settings
    pub fetch: FetchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(Error::config_value(
                "fetch.timeout_secs",
                "must be greater than zero",
            ));
        }

        if let Some(endpoint) = &self.fetch.endpoint {
            Url::parse(endpoint)
                .map_err(|e| Error::config_value("fetch.endpoint", e.to_string()))?;
        }

        if self.whitelist.enabled && self.whitelist.effective_domains().is_empty() {
            return Err(Error::config_value(
                "whitelist.domains",
                "whitelist is enabled but no domains are configured",
            ));
        }

        Ok(())
    }
}

/// Whitelist guard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Enable the whitelist guard
    pub enabled: bool,
    /// Allowed domains
    pub domains: Vec<String>,
    /// Also allow the suggested known-good media domains
    pub use_suggested: bool,
}

impl WhitelistConfig {
    /// The domains the guard will enforce: configured ones first, then the
    /// suggested list when opted in
    pub fn effective_domains(&self) -> Vec<String> {
        let mut domains = self.domains.clone();
        if self.use_suggested {
            domains.extend(SUGGESTED_WHITELIST.iter().map(ToString::to_string));
        }
        domains
    }
}

/// Fetch primitive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// oEmbed endpoint to query; when unset, the target URL is fetched
    /// directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with each request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
            user_agent: concat!("oembix/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log file path (None = stdout only)
    pub file: Option<String>,
    /// Enable JSON format logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json_format: false,
        }
    }
}
