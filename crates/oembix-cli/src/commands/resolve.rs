//! Resolve command - run the pipeline against one URL

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use oembix_core::{Config, FilterSet, HttpFetcher, Options, Pipeline};

/// Arguments for the resolve command
#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// URL to resolve
    pub url: String,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<String>,

    /// Allowed domain (repeatable); overrides the configured whitelist
    #[arg(short = 'w', long = "whitelist", value_name = "DOMAIN")]
    pub whitelist: Vec<String>,

    /// Also allow the suggested known-good media domains
    #[arg(long)]
    pub use_suggested: bool,

    /// Fetch option as key=value (repeatable), forwarded to the fetcher
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Print the metadata on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Execute the resolve command
pub async fn execute(args: ResolveArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.validate()?;

    let fetcher = Arc::new(HttpFetcher::from_config(&config.fetch)?);
    let mut pipeline = Pipeline::from_config(&config, fetcher, FilterSet::default());

    if !args.whitelist.is_empty() || args.use_suggested {
        let mut domains = args.whitelist.clone();
        if args.use_suggested {
            domains.extend(
                oembix_core::SUGGESTED_WHITELIST
                    .iter()
                    .map(ToString::to_string),
            );
        }
        pipeline.whitelist(domains);
    }

    let options = parse_options(&args.options)?;

    match pipeline.fetch(&args.url, options).await {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                warn!("{warning}");
            }
            match outcome.response {
                Some(metadata) => {
                    let rendered = if args.compact {
                        serde_json::to_string(metadata.as_value())?
                    } else {
                        serde_json::to_string_pretty(metadata.as_value())?
                    };
                    println!("{rendered}");
                }
                None => info!("no metadata produced for {}", args.url),
            }
            Ok(())
        }
        Err(failure) => {
            for warning in &failure.warnings {
                warn!("{warning}");
            }
            Err(anyhow!(failure.error))
        }
    }
}

/// Parse repeated key=value pairs into fetch options
///
/// Values that parse as JSON keep their type; everything else is a string.
fn parse_options(pairs: &[String]) -> Result<Options> {
    let mut options = Options::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid option '{pair}', expected KEY=VALUE"))?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        options.insert(key.to_string(), value);
    }
    Ok(options)
}
