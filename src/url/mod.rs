//! URL handling module for Doc-Harvest
//!
//! Seed validation and the host comparison behind the same-domain rule.

mod domain;

pub use domain::{extract_domain, same_site};

use crate::UrlError;
use url::Url;

/// Validates a seed URL before crawling
///
/// A seed must parse as an absolute http(s) URL with a non-empty host.
/// The fragment is dropped, matching how extracted links are keyed.
///
/// # Examples
///
/// ```
/// use doc_harvest::url::validate_seed;
///
/// let seed = validate_seed("https://docs.example.com").unwrap();
/// assert_eq!(seed.as_str(), "https://docs.example.com/");
///
/// assert!(validate_seed("docs.example.com/guide").is_err());
/// assert!(validate_seed("mailto:team@example.com").is_err());
/// ```
pub fn validate_seed(seed: &str) -> Result<Url, UrlError> {
    let mut url =
        Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingDomain),
    }

    url.set_fragment(None);
    Ok(url)
}
