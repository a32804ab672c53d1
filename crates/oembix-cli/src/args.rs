//! Command-line argument parsing

use clap::{Parser, ValueEnum};

use crate::commands::Command;

/// oembix - resolve URLs into oEmbed-style metadata
///
/// Runs a staged filter pipeline around a single HTTP fetch: an optional
/// domain whitelist gates the URL, before-filters may rewrite it, fallback
/// resolvers step in when the fetch yields nothing, and after-filters
/// post-process the result.
#[derive(Parser, Debug)]
#[command(name = "oembix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}
