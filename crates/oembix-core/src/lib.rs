//! # oembix Core
//!
//! Staged, pluggable pipeline for resolving a URL into an oEmbed-style
//! metadata response.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Pipeline** - guard → before → fetch → fallback → after sequencing
//! - **Filters** - async extension points plugged into each stage
//! - **Whitelist guard** - optional domain gate in front of everything
//! - **Fetch primitive** - the single wrapped fetch, with a reqwest default
//! - **Configuration** - TOML-backed settings for guard, fetch, and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use oembix_core::{HttpFetcher, Options, Pipeline};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pipeline = Pipeline::new(Arc::new(HttpFetcher::new()));
//! pipeline.whitelist(vec!["vimeo.com".to_string()]);
//!
//! let outcome = pipeline.fetch("http://vimeo.com/video/1", Options::new()).await?;
//! if let Some(metadata) = outcome.response {
//!     println!("{}", metadata.as_value());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod pipeline;
pub mod whitelist;

// Re-exports for convenience
pub use config::Config;
pub use domain::in_domain;
pub use error::{Error, ResolveError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use filters::{AfterFilter, BeforeFilter, FallbackFilter, FilterSet, Registry};
pub use pipeline::{ContextPatch, Metadata, Options, Pipeline, PipelineContext, Resolution};
pub use whitelist::{Whitelist, SUGGESTED_WHITELIST};
