//! Whitelist guard
//!
//! Optional gate in front of the pipeline: when configured, only URLs whose
//! host falls inside one of the allowed domains are fetched at all.

use url::Url;

use crate::domain::in_domain;
use crate::error::{Error, Result};

/// Known-good media domains offered as an opt-in convenience
///
/// Callers that just want "the usual embed providers" can pass this to
/// [`crate::Pipeline::whitelist`] instead of curating their own list.
pub const SUGGESTED_WHITELIST: &[&str] = &[
    "youtube.com",
    "blip.tv",
    "dailymotion.com",
    "flickr.com",
    "hulu.com",
    "nfb.ca",
    "qik.com",
    "revision3.com",
    "scribd.com",
    "viddler.com",
    "vimeo.com",
    "dotsub.com",
    "yfrog.com",
    "photobucket.com",
];

/// Ordered set of allowed domains gating which URLs may be fetched
#[derive(Debug, Clone)]
pub struct Whitelist {
    domains: Vec<String>,
}

impl Whitelist {
    /// Create a whitelist from a list of allowed domains
    pub fn new(domains: Vec<String>) -> Self {
        Self { domains }
    }

    /// Create a whitelist from the suggested media domains
    pub fn suggested() -> Self {
        Self::new(SUGGESTED_WHITELIST.iter().map(ToString::to_string).collect())
    }

    /// The configured domains, in order
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Check whether a URL may be fetched
    ///
    /// Fails with [`Error::InvalidUrl`] when the URL cannot be parsed or has
    /// no host, and with [`Error::RejectedDomain`] when the host matches none
    /// of the allowed domains.
    pub fn check(&self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|_| Error::invalid_url(url))?;
        let hostname = parsed.host_str().ok_or_else(|| Error::invalid_url(url))?;

        if self.domains.iter().any(|domain| in_domain(domain, hostname)) {
            return Ok(());
        }

        Err(Error::RejectedDomain {
            url: url.to_string(),
            hostname: hostname.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_domain_passes() {
        let whitelist = Whitelist::new(vec!["vimeo.com".to_string()]);
        assert!(whitelist.check("http://player.vimeo.com/video/1").is_ok());
        assert!(whitelist.check("http://vimeo.com/1234").is_ok());
    }

    #[test]
    fn test_unlisted_domain_is_rejected() {
        let whitelist = Whitelist::new(vec!["vimeo.com".to_string()]);
        let err = whitelist.check("http://evil.com/x").unwrap_err();
        match err {
            Error::RejectedDomain { hostname, .. } => assert_eq!(hostname, "evil.com"),
            other => panic!("expected RejectedDomain, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_url() {
        let whitelist = Whitelist::new(vec!["vimeo.com".to_string()]);
        assert!(matches!(
            whitelist.check("not a url"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_url_without_host() {
        let whitelist = Whitelist::new(vec!["vimeo.com".to_string()]);
        assert!(matches!(
            whitelist.check("data:text/plain,hello"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_any_listed_domain_suffices() {
        let whitelist = Whitelist::new(vec![
            "youtube.com".to_string(),
            "vimeo.com".to_string(),
        ]);
        assert!(whitelist.check("https://www.youtube.com/watch?v=abc").is_ok());
        assert!(whitelist.check("https://vimeo.com/42").is_ok());
    }

    #[test]
    fn test_suggested_contains_common_providers() {
        let whitelist = Whitelist::suggested();
        assert!(whitelist.domains().contains(&"youtube.com".to_string()));
        assert!(whitelist.check("http://www.flickr.com/photos/1").is_ok());
    }
}
