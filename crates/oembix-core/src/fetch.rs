//! Fetch primitive
//!
//! The single underlying fetch the pipeline wraps. [`Fetcher`] is the
//! collaborator contract; [`HttpFetcher`] is the default reqwest-backed
//! implementation. One attempt per invocation, no retry, no caching.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use url::Url;

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::pipeline::{Metadata, Options};

/// Asynchronous, single-attempt fetch of metadata for a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch metadata for `url`
    ///
    /// A failure here is non-fatal to the pipeline: it is demoted to a
    /// warning and the fallback resolvers get their turn.
    async fn fetch(&self, url: &str, options: &Options) -> Result<Metadata>;
}

/// Default HTTP fetch primitive
///
/// With a configured oEmbed endpoint, issues a GET against it carrying the
/// target URL, `format=json`, and any scalar options as query parameters.
/// Without one, GETs the target URL itself with a JSON `Accept` header.
/// Either way the body is deserialized as opaque JSON; no endpoint
/// discovery and no interpretation of the document.
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: Option<Url>,
}

impl HttpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Self {
        Self::from_config(&FetchConfig::default())
            .unwrap_or_else(|_| Self {
                client: reqwest::Client::new(),
                endpoint: None,
            })
    }

    /// Create a fetcher from configuration
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|e| Error::config_value("fetch.endpoint", e.to_string()))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_default();

        Ok(Self { client, endpoint })
    }

    /// Build the request URL for one fetch
    fn request_url(&self, url: &str, options: &Options) -> Result<Url> {
        match &self.endpoint {
            Some(endpoint) => {
                let mut request = endpoint.clone();
                {
                    let mut query = request.query_pairs_mut();
                    query.append_pair("url", url);
                    query.append_pair("format", "json");
                    for (key, value) in options {
                        if let Some(scalar) = scalar_to_string(value) {
                            query.append_pair(key, &scalar);
                        }
                    }
                }
                Ok(request)
            }
            None => Url::parse(url).map_err(|_| Error::fetch(url, "invalid URL")),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, options: &Options) -> Result<Metadata> {
        let request_url = self.request_url(url, options)?;

        let response = self
            .client
            .get(request_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(url, format!("HTTP status {status}")));
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| Error::fetch(url, format!("invalid JSON body: {e}")))?;

        Ok(Metadata::new(value))
    }
}

/// Render a scalar option as a query parameter value
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
