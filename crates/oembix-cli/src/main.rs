//! oembix CLI
//!
//! Command-line interface for resolving URLs into oEmbed-style metadata.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    logging::init(&args)?;

    // Run the selected command
    let result = run(args).await;

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        commands::Command::Resolve(resolve_args) => {
            commands::resolve::execute(resolve_args).await
        }
        commands::Command::Domain(domain_args) => {
            commands::domain::execute(&domain_args)
        }
        commands::Command::Config(config_args) => {
            commands::config::execute(&config_args)
        }
    }
}
