//! Error types for oembix-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Main error type for oembix-core operations
///
/// All variants carry owned strings so errors stay `Clone`: a non-fatal
/// failure is accumulated as a warning and the first warning may later be
/// surfaced again as the terminal error of the invocation.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The unparsable URL
        url: String,
    },

    /// URL's host is not covered by the configured whitelist
    #[error("{url} is not in a whitelisted domain")]
    RejectedDomain {
        /// The rejected URL
        url: String,
        /// Hostname extracted from the URL
        hostname: String,
    },

    /// Primary fetch failed
    #[error("fetch failed for '{url}': {message}")]
    Fetch {
        /// URL the fetch was attempted against
        url: String,
        /// Failure detail
        message: String,
    },

    /// A filter reported a failure
    #[error("filter '{filter}' failed: {message}")]
    Filter {
        /// Name of the filter that failed
        filter: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a filter error
    pub fn filter(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Filter {
            filter: filter.into(),
            message: message.into(),
        }
    }

    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Whether this error terminates a pipeline run on its own
    ///
    /// Guard rejections are fatal; everything else is demoted to a warning
    /// unless it comes out of the after stage.
    pub fn is_guard_error(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. } | Self::RejectedDomain { .. })
    }
}

/// Terminal failure of a pipeline invocation
///
/// Carries the error that ended the run together with every warning recorded
/// before it, in order. `warnings` is empty when the guard rejected the URL
/// before any stage ran.
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct ResolveError {
    /// The error surfaced to the caller
    pub error: Error,
    /// Ordered warnings accumulated before the failure
    pub warnings: Vec<Error>,
}

impl ResolveError {
    /// Create a failure with no accompanying warnings
    pub fn fatal(error: Error) -> Self {
        Self {
            error,
            warnings: Vec::new(),
        }
    }

    /// Create a failure carrying the warnings recorded so far
    pub fn with_warnings(error: Error, warnings: Vec<Error>) -> Self {
        Self { error, warnings }
    }
}
