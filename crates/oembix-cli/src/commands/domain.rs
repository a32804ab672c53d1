//! Domain command - evaluate the whitelist matcher directly

use anyhow::Result;

use oembix_core::in_domain;

/// Arguments for the domain command
#[derive(clap::Args, Debug)]
pub struct DomainArgs {
    /// Domain to test against
    pub domain: String,

    /// Hostname being checked
    pub hostname: String,
}

/// Execute the domain command
///
/// Prints the verdict and exits non-zero when the hostname is outside the
/// domain, so the command composes in shell scripts.
pub fn execute(args: &DomainArgs) -> Result<()> {
    if in_domain(&args.domain, &args.hostname) {
        println!("{} is within {}", args.hostname, args.domain);
        Ok(())
    } else {
        println!("{} is not within {}", args.hostname, args.domain);
        std::process::exit(1);
    }
}
