//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests with redirect following and a bounded timeout
//! - Error classification
//!
//! Failures are soft. `fetch_html` logs them and hands back an empty body,
//! which the crawler treats as "page unusable".

use crate::config::UserAgentConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body on success, empty content otherwise
    pub fn into_body(self) -> String {
        match self {
            FetchResult::Success { body, .. } => body,
            _ => String::new(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client pools connections and is meant to be built once per session,
/// shared by every crawler, and dropped after the last crawl.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
/// * `max_redirects` - Redirect hops followed before giving up
///
/// # Example
///
/// ```no_run
/// use doc_harvest::config::UserAgentConfig;
/// use doc_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10), 10).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
    max_redirects: usize,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, classifying the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | Success |
/// | Any other status | HttpError |
/// | Timeout, refused connection, unreadable body | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else if e.is_redirect() {
                "Too many redirects".to_string()
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}

/// Fetches a page's HTML, or empty content on any failure
pub async fn fetch_html(client: &Client, url: &str) -> String {
    let result = fetch_url(client, url).await;
    match &result {
        FetchResult::Success {
            final_url,
            status_code,
            ..
        } => {
            if final_url != url {
                tracing::debug!("{} redirected to {} ({})", url, final_url, status_code);
            }
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("Failed to fetch {}: HTTP {}", url, status_code);
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Failed to fetch {}: {}", url, error);
        }
    }
    result.into_body()
}
