//! Domain matching
//!
//! The predicate behind whitelist checks: does a hostname belong to a domain
//! or one of its subdomains.

/// Check whether `hostname` is `domain` itself or a subdomain of it
///
/// Case-insensitive. `hostname` matches when it equals `domain` exactly or
/// ends with `"." + domain`. No wildcard or punycode handling.
///
/// ```
/// use oembix_core::in_domain;
///
/// assert!(in_domain("vimeo.com", "player.vimeo.com"));
/// assert!(in_domain("vimeo.com", "VIMEO.com"));
/// assert!(!in_domain("example.com", "notexample.com"));
/// ```
pub fn in_domain(domain: &str, hostname: &str) -> bool {
    let hostname = hostname.to_lowercase();
    let domain = domain.to_lowercase();

    if hostname == domain {
        return true;
    }

    hostname
        .strip_suffix(&domain)
        .is_some_and(|prefix| prefix.ends_with('.'))
}
