use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host, or `None` for URLs without one.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_harvest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs share host and port
///
/// This is the same-domain rule of the crawler: a link is followed only if
/// its authority matches the start page's. Subdomains are different sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_harvest::url::same_site;
///
/// let start = Url::parse("https://docs.example.com/").unwrap();
/// let link = Url::parse("https://docs.example.com/guide#intro").unwrap();
/// let other = Url::parse("https://blog.example.com/").unwrap();
/// assert!(same_site(&start, &link));
/// assert!(!same_site(&start, &other));
/// ```
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(ha), Some(hb)) => ha == hb && a.port() == b.port(),
        _ => false,
    }
}
