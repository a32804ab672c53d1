//! Pipeline filters
//!
//! Pluggable filters for observing and altering URL resolution. Each stage
//! has its own trait shape, and the [`Registry`] holds the three ordered
//! filter lists for one pipeline instance.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::pipeline::{ContextPatch, Metadata, PipelineContext};

/// Filter run before the primary fetch
///
/// May rewrite the URL or options, or establish a response outright (which
/// skips the fetch and fallback stages). Failures are non-fatal: they are
/// recorded as warnings and the next filter still runs.
#[async_trait]
pub trait BeforeFilter: Send + Sync {
    /// Filter name for logging
    fn name(&self) -> &str;

    /// Inspect the context and return replacement values
    async fn apply(&self, ctx: &PipelineContext) -> Result<ContextPatch>;
}

/// Filter run after a response has been established
///
/// Returns `Some` to replace the response wholesale, `None` to keep it.
/// Failures are fatal and end the invocation with that error.
#[async_trait]
pub trait AfterFilter: Send + Sync {
    /// Filter name for logging
    fn name(&self) -> &str;

    /// Post-process the established response
    async fn apply(&self, ctx: &PipelineContext) -> Result<Option<Metadata>>;
}

/// Resolver tried when the primary fetch produced no response
///
/// Returns `Some` to adopt a response (stopping the stage), `None` to pass.
/// Failures are non-fatal: recorded as warnings, iteration continues.
#[async_trait]
pub trait FallbackFilter: Send + Sync {
    /// Filter name for logging
    fn name(&self) -> &str;

    /// Attempt to produce a response for the current URL and options
    async fn apply(&self, ctx: &PipelineContext) -> Result<Option<Metadata>>;
}

/// Seed filters supplied by the hosting application
///
/// Seeds are installed at construction time and always precede filters
/// added later through the registry.
#[derive(Default)]
pub struct FilterSet {
    /// Seed before-filters, in order
    pub before: Vec<Arc<dyn BeforeFilter>>,
    /// Seed after-filters, in order
    pub after: Vec<Arc<dyn AfterFilter>>,
    /// Seed fallback resolvers, in order
    pub fallback: Vec<Arc<dyn FallbackFilter>>,
}

/// Ordered filter lists for one pipeline instance
///
/// Lists are append-only: there is no removal operation, and seeds always
/// come first. They are read in full on every invocation, so filters added
/// between invocations take effect on the next one.
#[derive(Default)]
pub struct Registry {
    before: Vec<Arc<dyn BeforeFilter>>,
    after: Vec<Arc<dyn AfterFilter>>,
    fallback: Vec<Arc<dyn FallbackFilter>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with seed filters
    pub fn with_seeds(seeds: FilterSet) -> Self {
        Self {
            before: seeds.before,
            after: seeds.after,
            fallback: seeds.fallback,
        }
    }

    /// Append a before-filter after all existing ones
    pub fn add_before(&mut self, filter: Arc<dyn BeforeFilter>) {
        self.before.push(filter);
    }

    /// Append an after-filter after all existing ones
    pub fn add_after(&mut self, filter: Arc<dyn AfterFilter>) {
        self.after.push(filter);
    }

    /// Append a fallback resolver after all existing ones
    pub fn add_fallback(&mut self, filter: Arc<dyn FallbackFilter>) {
        self.fallback.push(filter);
    }

    /// The before-filters, seeds first
    pub fn before(&self) -> &[Arc<dyn BeforeFilter>] {
        &self.before
    }

    /// The after-filters, seeds first
    pub fn after(&self) -> &[Arc<dyn AfterFilter>] {
        &self.after
    }

    /// The fallback resolvers, seeds first
    pub fn fallback(&self) -> &[Arc<dyn FallbackFilter>] {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Options;

    struct NamedBefore(&'static str);

    #[async_trait]
    impl BeforeFilter for NamedBefore {
        fn name(&self) -> &str {
            self.0
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<ContextPatch> {
            Ok(ContextPatch::none())
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.before().is_empty());
        assert!(registry.after().is_empty());
        assert!(registry.fallback().is_empty());
    }

    #[test]
    fn test_seeds_precede_added_filters() {
        let seeds = FilterSet {
            before: vec![Arc::new(NamedBefore("seed"))],
            ..FilterSet::default()
        };
        let mut registry = Registry::with_seeds(seeds);
        registry.add_before(Arc::new(NamedBefore("first")));
        registry.add_before(Arc::new(NamedBefore("second")));

        let names: Vec<_> = registry.before().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["seed", "first", "second"]);
    }

    #[tokio::test]
    async fn test_filters_are_shareable() {
        let filter: Arc<dyn BeforeFilter> = Arc::new(NamedBefore("shared"));
        let mut registry = Registry::new();
        registry.add_before(Arc::clone(&filter));
        registry.add_before(filter);

        let ctx = PipelineContext::new("http://example.com/a", Options::new());
        for entry in registry.before() {
            assert!(entry.apply(&ctx).await.is_ok());
        }
    }
}
