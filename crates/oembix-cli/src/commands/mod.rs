//! CLI commands

pub mod config;
pub mod domain;
pub mod resolve;

use clap::Subcommand;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a URL into oEmbed-style metadata
    Resolve(resolve::ResolveArgs),

    /// Check whether a hostname belongs to a domain or one of its subdomains
    Domain(domain::DomainArgs),

    /// Show or validate configuration
    Config(config::ConfigArgs),
}
