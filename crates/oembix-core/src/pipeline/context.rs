//! Pipeline execution context
//!
//! Per-invocation state threaded through the filter stages.

use serde::{Deserialize, Serialize};

/// Opaque metadata document produced by the fetch primitive or a filter
///
/// The pipeline never interprets its fields, only whether one is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(serde_json::Value);

impl Metadata {
    /// Wrap a JSON value
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwrap into the underlying JSON value
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for Metadata {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Per-invocation options handed opaquely to filters and the fetcher
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Mutable state for one pipeline invocation
///
/// Exclusively owned by that invocation. Stages replace fields wholesale;
/// `response` starts absent and, once set, is never cleared.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// URL being resolved (a before-filter may rewrite it)
    pub url: String,
    /// Options for this invocation
    pub options: Options,
    /// Metadata established so far, if any
    pub response: Option<Metadata>,
}

impl PipelineContext {
    /// Create the context for a fresh invocation
    pub fn new(url: impl Into<String>, options: Options) -> Self {
        Self {
            url: url.into(),
            options,
            response: None,
        }
    }

    /// Apply a filter's replacement values
    ///
    /// Fields the patch leaves unset keep their prior value.
    pub fn apply(&mut self, patch: ContextPatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(response) = patch.response {
            self.response = Some(response);
        }
    }
}

/// Replacement values returned by a before-filter
///
/// Each field is a wholesale replacement for the corresponding context
/// field, never a merge.
#[derive(Debug, Clone, Default)]
pub struct ContextPatch {
    /// Replacement URL
    pub url: Option<String>,
    /// Replacement options
    pub options: Option<Options>,
    /// Response to establish, preempting the fetch stage
    pub response: Option<Metadata>,
}

impl ContextPatch {
    /// A patch that changes nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace the URL
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Replace the options
    pub fn options(options: Options) -> Self {
        Self {
            options: Some(options),
            ..Self::default()
        }
    }

    /// Establish a response
    pub fn response(response: Metadata) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }
}
