//! Stage runners
//!
//! Sequential executors for one ordered filter list each. Filters run
//! strictly in list order; the runner suspends at each filter's await point
//! before moving to the next. An empty list completes immediately.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::filters::{AfterFilter, BeforeFilter, FallbackFilter};
use crate::pipeline::context::PipelineContext;

/// Run the before-filters (mutating-sequential, non-fatal)
///
/// Each filter sees the current context and may replace fields through its
/// patch. A failing filter leaves the context untouched, its error is
/// recorded as a warning, and iteration continues.
pub(crate) async fn run_before(
    filters: &[Arc<dyn BeforeFilter>],
    ctx: &mut PipelineContext,
    warnings: &mut Vec<Error>,
) {
    for filter in filters {
        trace!(filter = filter.name(), url = %ctx.url, "running before-filter");
        match filter.apply(ctx).await {
            Ok(patch) => ctx.apply(patch),
            Err(err) => {
                debug!(filter = filter.name(), error = %err, "before-filter failed, recording warning");
                warnings.push(err);
            }
        }
    }
}

/// Run the fallback resolvers (first-success-wins, non-fatal)
///
/// Stops at the first resolver that yields a response and adopts it. A
/// failing resolver is recorded as a warning and the next one is tried.
pub(crate) async fn run_fallback(
    filters: &[Arc<dyn FallbackFilter>],
    ctx: &mut PipelineContext,
    warnings: &mut Vec<Error>,
) {
    for filter in filters {
        trace!(filter = filter.name(), url = %ctx.url, "trying fallback");
        match filter.apply(ctx).await {
            Ok(Some(response)) => {
                debug!(filter = filter.name(), "fallback produced a response");
                ctx.response = Some(response);
                return;
            }
            Ok(None) => {}
            Err(err) => {
                debug!(filter = filter.name(), error = %err, "fallback failed, recording warning");
                warnings.push(err);
            }
        }
    }
}

/// Run the after-filters (mutating-sequential, fatal)
///
/// Each filter may replace the established response. The first failure
/// stops the stage and propagates.
pub(crate) async fn run_after(
    filters: &[Arc<dyn AfterFilter>],
    ctx: &mut PipelineContext,
) -> Result<()> {
    for filter in filters {
        trace!(filter = filter.name(), url = %ctx.url, "running after-filter");
        if let Some(response) = filter.apply(ctx).await? {
            ctx.response = Some(response);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pipeline::{ContextPatch, Metadata, Options};
    use async_trait::async_trait;
    use serde_json::json;

    struct RewriteUrl(&'static str);

    #[async_trait]
    impl BeforeFilter for RewriteUrl {
        fn name(&self) -> &str {
            "rewrite_url"
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<ContextPatch> {
            Ok(ContextPatch::url(self.0))
        }
    }

    struct FailingBefore;

    #[async_trait]
    impl BeforeFilter for FailingBefore {
        fn name(&self) -> &str {
            "failing_before"
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<ContextPatch> {
            Err(Error::filter("failing_before", "boom"))
        }
    }

    struct YieldingFallback;

    #[async_trait]
    impl FallbackFilter for YieldingFallback {
        fn name(&self) -> &str {
            "yielding"
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
            Ok(Some(Metadata::new(json!({"source": "fallback"}))))
        }
    }

    struct PassingFallback;

    #[async_trait]
    impl FallbackFilter for PassingFallback {
        fn name(&self) -> &str {
            "passing"
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
            Ok(None)
        }
    }

    struct FailingAfter;

    #[async_trait]
    impl AfterFilter for FailingAfter {
        fn name(&self) -> &str {
            "failing_after"
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
            Err(Error::filter("failing_after", "broken response"))
        }
    }

    struct KeepResponse;

    #[async_trait]
    impl AfterFilter for KeepResponse {
        fn name(&self) -> &str {
            "keep"
        }

        async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
            Ok(None)
        }
    }

    fn ctx() -> PipelineContext {
        PipelineContext::new("http://example.com/a", Options::new())
    }

    #[tokio::test]
    async fn test_empty_stage_is_a_no_op() {
        let mut ctx = ctx();
        let mut warnings = Vec::new();
        run_before(&[], &mut ctx, &mut warnings).await;
        run_fallback(&[], &mut ctx, &mut warnings).await;
        run_after(&[], &mut ctx).await.unwrap();
        assert!(warnings.is_empty());
        assert!(ctx.response.is_none());
        assert_eq!(ctx.url, "http://example.com/a");
    }

    #[tokio::test]
    async fn test_before_failure_continues_with_next_filter() {
        let filters: Vec<Arc<dyn BeforeFilter>> = vec![
            Arc::new(FailingBefore),
            Arc::new(RewriteUrl("http://example.com/rewritten")),
        ];
        let mut ctx = ctx();
        let mut warnings = Vec::new();
        run_before(&filters, &mut ctx, &mut warnings).await;

        assert_eq!(warnings.len(), 1);
        assert_eq!(ctx.url, "http://example.com/rewritten");
    }

    #[tokio::test]
    async fn test_fallback_stops_at_first_response() {
        struct Exploding;

        #[async_trait]
        impl FallbackFilter for Exploding {
            fn name(&self) -> &str {
                "exploding"
            }

            async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
                panic!("must not be reached after a fallback succeeded");
            }
        }

        let filters: Vec<Arc<dyn FallbackFilter>> = vec![
            Arc::new(PassingFallback),
            Arc::new(YieldingFallback),
            Arc::new(Exploding),
        ];
        let mut ctx = ctx();
        let mut warnings = Vec::new();
        run_fallback(&filters, &mut ctx, &mut warnings).await;

        assert!(warnings.is_empty());
        assert_eq!(
            ctx.response,
            Some(Metadata::new(json!({"source": "fallback"})))
        );
    }

    #[tokio::test]
    async fn test_fallback_failures_accumulate_without_stopping() {
        struct Failing(&'static str);

        #[async_trait]
        impl FallbackFilter for Failing {
            fn name(&self) -> &str {
                self.0
            }

            async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
                Err(Error::filter(self.0, "no luck"))
            }
        }

        let filters: Vec<Arc<dyn FallbackFilter>> = vec![
            Arc::new(Failing("first")),
            Arc::new(Failing("second")),
            Arc::new(YieldingFallback),
        ];
        let mut ctx = ctx();
        let mut warnings = Vec::new();
        run_fallback(&filters, &mut ctx, &mut warnings).await;

        assert_eq!(warnings.len(), 2);
        assert!(ctx.response.is_some());
    }

    #[tokio::test]
    async fn test_after_failure_is_fatal_and_stops_the_stage() {
        struct Unreached;

        #[async_trait]
        impl AfterFilter for Unreached {
            fn name(&self) -> &str {
                "unreached"
            }

            async fn apply(&self, _ctx: &PipelineContext) -> Result<Option<Metadata>> {
                panic!("must not run after a fatal after-filter error");
            }
        }

        let filters: Vec<Arc<dyn AfterFilter>> = vec![
            Arc::new(KeepResponse),
            Arc::new(FailingAfter),
            Arc::new(Unreached),
        ];
        let mut ctx = ctx();
        ctx.response = Some(Metadata::new(json!({"type": "video"})));

        let err = run_after(&filters, &mut ctx).await.unwrap_err();
        assert!(err.to_string().contains("failing_after"));
    }
}
