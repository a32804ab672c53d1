//! Config command - show or validate configuration

use anyhow::Result;
use tracing::info;

use oembix_core::Config;

/// Arguments for the config command
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Validate a configuration file instead of printing defaults
    #[arg(long, value_name = "FILE")]
    pub validate: Option<String>,
}

/// Execute the config command
pub fn execute(args: &ConfigArgs) -> Result<()> {
    match &args.validate {
        Some(path) => {
            let config = Config::load(path)?;
            config.validate()?;
            info!("{path} is valid");
            Ok(())
        }
        None => {
            let config = Config::default();
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
