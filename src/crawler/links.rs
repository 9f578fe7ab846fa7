//! Link extraction
//!
//! Parses anchors out of HTML and resolves them against the page URL.
//! Only absolute http(s) URLs with a host survive; fragments are dropped so
//! in-page anchors resolve to the page itself.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// Links are returned in document order. Duplicates are kept; the crawler's
/// visited set takes care of them.
///
/// # Example
///
/// ```
/// use doc_harvest::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/guide">Guide</a><a href="mailto:x@example.com">Mail</a>"#;
/// let base = Url::parse("https://docs.example.com/start").unwrap();
/// assert_eq!(extract_links(html, &base), vec!["https://docs.example.com/guide"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for hrefs that do not resolve, resolve to a non-http(s)
/// scheme (`javascript:`, `mailto:`, `tel:`, `data:`), or lack a host.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let mut absolute_url = base_url.join(href.trim()).ok()?;

    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    if absolute_url.host_str().map_or(true, str::is_empty) {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        assert_eq!(extract_links(html, &base_url()), vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_links() {
        let html = r#"<a href="/other">Root</a><a href="sibling">Sibling</a><a href="../up">Up</a>"#;
        assert_eq!(
            extract_links(html, &base_url()),
            vec![
                "https://example.com/other",
                "https://example.com/docs/sibling",
                "https://example.com/up",
            ]
        );
    }

    #[test]
    fn test_skip_non_http_schemes() {
        let html = r#"
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,hi">Data</a>
            <a href="ftp://example.com/file">FTP</a>
        "#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_fragment_resolves_to_page() {
        let html = r##"<a href="#section">Jump</a><a href="/other#top">Other</a>"##;
        assert_eq!(
            extract_links(html, &base_url()),
            vec!["https://example.com/docs/page", "https://example.com/other"]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="top">Top</a><a href="/ok">Ok</a>"#;
        assert_eq!(extract_links(html, &base_url()), vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_malformed_href_dropped() {
        let html = r#"<a href="http://">Broken</a><a href="https://[bad">Bad</a>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_links_keep_document_order_and_duplicates() {
        let html = r#"<a href="/b">B</a><a href="/a">A</a><a href="/b">B again</a>"#;
        assert_eq!(
            extract_links(html, &base_url()),
            vec![
                "https://example.com/b",
                "https://example.com/a",
                "https://example.com/b",
            ]
        );
    }

    #[test]
    fn test_links_never_lack_host_or_http_scheme() {
        let html = r#"<a href="file:///etc/passwd">F</a><a href="//cdn.example.com/x">CDN</a>"#;
        for link in extract_links(html, &base_url()) {
            let url = Url::parse(&link).unwrap();
            assert!(url.scheme() == "http" || url.scheme() == "https");
            assert!(url.host_str().is_some());
        }
    }
}
