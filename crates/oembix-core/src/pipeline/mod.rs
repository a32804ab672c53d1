//! URL resolution pipeline
//!
//! Composes the whitelist guard and the four filter stages around one fetch
//! primitive. Stage order is fixed: guard, before, fetch, fallback, after,
//! finalize. Within a stage, filters run strictly in list order.

mod context;
mod stages;

pub use context::{ContextPatch, Metadata, Options, PipelineContext};

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{Error, ResolveError};
use crate::fetch::Fetcher;
use crate::filters::{AfterFilter, BeforeFilter, FallbackFilter, FilterSet, Registry};
use crate::whitelist::Whitelist;

/// Successful outcome of a pipeline invocation
///
/// `response` is absent only when the fetch and every fallback yielded
/// nothing while also producing no warnings: no result, no explanation.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved metadata, if any was produced
    pub response: Option<Metadata>,
    /// Non-fatal errors recorded along the way, in order
    pub warnings: Vec<Error>,
}

/// Staged pipeline resolving URLs into oEmbed-style metadata
///
/// Owns its filter lists and optional whitelist. Filter additions take
/// `&mut self` and therefore cannot race an in-flight invocation; multiple
/// invocations may run concurrently against a shared reference.
pub struct Pipeline {
    registry: Registry,
    whitelist: Option<Whitelist>,
    fetcher: Arc<dyn Fetcher>,
}

impl Pipeline {
    /// Create a pipeline with no seed filters and no whitelist
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_seeds(fetcher, FilterSet::default())
    }

    /// Create a pipeline seeded with the host application's default filters
    ///
    /// Seed filters always precede filters added later.
    pub fn with_seeds(fetcher: Arc<dyn Fetcher>, seeds: FilterSet) -> Self {
        Self {
            registry: Registry::with_seeds(seeds),
            whitelist: None,
            fetcher,
        }
    }

    /// Create a pipeline from configuration
    ///
    /// Applies the whitelist section; the fetcher and seed filters are
    /// supplied by the caller.
    pub fn from_config(config: &Config, fetcher: Arc<dyn Fetcher>, seeds: FilterSet) -> Self {
        let mut pipeline = Self::with_seeds(fetcher, seeds);
        if config.whitelist.enabled {
            pipeline.whitelist(config.whitelist.effective_domains());
        }
        pipeline
    }

    /// Configure the domain whitelist, replacing any prior list
    pub fn whitelist(&mut self, domains: Vec<String>) {
        self.whitelist = Some(Whitelist::new(domains));
    }

    /// The configured whitelist, if any
    pub fn whitelist_domains(&self) -> Option<&[String]> {
        self.whitelist.as_ref().map(Whitelist::domains)
    }

    /// Append a before-filter after all existing ones
    pub fn add_before(&mut self, filter: Arc<dyn BeforeFilter>) {
        self.registry.add_before(filter);
    }

    /// Append an after-filter after all existing ones
    pub fn add_after(&mut self, filter: Arc<dyn AfterFilter>) {
        self.registry.add_after(filter);
    }

    /// Append a fallback resolver after all existing ones
    pub fn add_fallback(&mut self, filter: Arc<dyn FallbackFilter>) {
        self.registry.add_fallback(filter);
    }

    /// Resolve a URL into metadata
    ///
    /// Runs the stages in order. Guard rejections and after-filter errors
    /// are fatal; every other failure is demoted to a warning. When no
    /// response materializes, the first warning becomes the terminal error.
    #[instrument(skip(self, options), fields(url = %url))]
    pub async fn fetch(
        &self,
        url: &str,
        options: Options,
    ) -> std::result::Result<Resolution, ResolveError> {
        if let Some(whitelist) = &self.whitelist {
            if let Err(err) = whitelist.check(url) {
                debug!(error = %err, "whitelist guard rejected URL");
                return Err(ResolveError::fatal(err));
            }
        }

        let mut ctx = PipelineContext::new(url, options);
        let mut warnings = Vec::new();

        stages::run_before(self.registry.before(), &mut ctx, &mut warnings).await;

        if ctx.response.is_none() {
            match self.fetcher.fetch(&ctx.url, &ctx.options).await {
                Ok(response) => ctx.response = Some(response),
                Err(err) => {
                    debug!(error = %err, "fetch failed, recording warning");
                    warnings.push(err);
                }
            }
        } else {
            debug!("fetch preempted by a before-filter response");
        }

        if ctx.response.is_none() {
            stages::run_fallback(self.registry.fallback(), &mut ctx, &mut warnings).await;
        }

        if ctx.response.is_some() {
            if let Err(err) = stages::run_after(self.registry.after(), &mut ctx).await {
                debug!(error = %err, "after-filter failed, terminating");
                return Err(ResolveError::with_warnings(err, warnings));
            }
        }

        finalize(ctx.response, warnings)
    }
}

/// Produce the terminal outcome from the established response and warnings
///
/// Response present: success carrying the warnings. Response absent with
/// warnings: the first warning becomes the terminal error, the full list
/// rides along. Response absent without warnings: success with nothing in
/// it, since no fatal condition was ever recorded.
fn finalize(
    response: Option<Metadata>,
    warnings: Vec<Error>,
) -> std::result::Result<Resolution, ResolveError> {
    if response.is_none() {
        if let Some(first) = warnings.first().cloned() {
            return Err(ResolveError::with_warnings(first, warnings));
        }
    }
    Ok(Resolution { response, warnings })
}
