//! Crawler coordinator - depth-first, same-domain traversal
//!
//! One `Crawler` owns the per-call state (visited set and collected pages)
//! and a handle to the shared HTTP client. State is reset at the start of
//! every `crawl` call; the client lives until `close`.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::fetch_html;
use crate::crawler::links::extract_links;
use crate::crawler::scheduler::{QueuedUrl, Scheduler};
use crate::model::Page;
use crate::url::{same_site, validate_seed};
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Mutable state of one crawl call
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    pages: Vec<Page>,
}

impl CrawlState {
    fn reset(&mut self) {
        self.visited.clear();
        self.pages.clear();
    }
}

/// Depth- and page-bounded crawler
pub struct Crawler {
    client: Client,
    max_depth: u32,
    max_pages: usize,
    state: CrawlState,
}

impl Crawler {
    /// Creates a crawler around a (possibly shared) client
    ///
    /// Bounds are taken as given; range checks belong to config validation.
    pub fn new(client: Client, max_depth: u32, max_pages: usize) -> Self {
        Self {
            client,
            max_depth,
            max_pages,
            state: CrawlState::default(),
        }
    }

    /// Creates a crawler using the bounds from the crawler configuration
    pub fn from_config(client: Client, config: &CrawlerConfig) -> Self {
        Self::new(client, config.max_depth, config.max_pages)
    }

    /// Crawls from `start_url`, returning the pages collected
    ///
    /// Never fails: an invalid seed yields an empty list, and fetch failures
    /// only prune their branch. Pages come back in depth-first, link order.
    pub async fn crawl(&mut self, start_url: &str) -> Vec<Page> {
        self.state.reset();

        let start = match validate_seed(start_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid URL: {} ({})", start_url, e);
                return Vec::new();
            }
        };

        let mut scheduler = Scheduler::seeded(start.as_str());

        while let Some(QueuedUrl { url, depth }) = scheduler.next_url() {
            if self.state.pages.len() >= self.max_pages {
                tracing::debug!(
                    "Page limit {} reached, {} URLs left unvisited",
                    self.max_pages,
                    scheduler.frontier_size() + 1
                );
                break;
            }

            if depth > self.max_depth || self.state.visited.contains(&url) {
                continue;
            }

            // Marked before fetching; a failed fetch is never retried
            self.state.visited.insert(url.clone());
            tracing::info!("Crawling {} at depth {}", url, depth);

            let html = fetch_html(&self.client, &url).await;
            if html.is_empty() {
                continue;
            }

            let links = if depth < self.max_depth {
                self.follow_links(&html, &url, &start)
            } else {
                Vec::new()
            };

            self.state.pages.push(Page::new(url, html));
            scheduler.push_links(links, depth + 1);
        }

        tracing::info!("Crawled {} pages from {}", self.state.pages.len(), start);
        std::mem::take(&mut self.state.pages)
    }

    /// Same-domain, not-yet-visited links of a fetched page
    fn follow_links(&self, html: &str, page_url: &str, start: &Url) -> Vec<String> {
        let base = match Url::parse(page_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Cannot resolve links of {}: {}", page_url, e);
                return Vec::new();
            }
        };

        extract_links(html, &base)
            .into_iter()
            .filter(|link| {
                Url::parse(link).is_ok_and(|parsed| same_site(&parsed, start))
                    && !self.state.visited.contains(link)
            })
            .collect()
    }

    /// True if `url` was visited during the last crawl call
    pub fn was_visited(&self, url: &str) -> bool {
        self.state.visited.contains(url)
    }

    /// Number of URLs visited during the last crawl call
    pub fn visited_count(&self) -> usize {
        self.state.visited.len()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Releases this crawler's handle on the HTTP client
    ///
    /// The connection pool is freed once every crawler sharing the client
    /// has been closed.
    pub fn close(self) {
        drop(self.client);
        tracing::info!("HTTP client closed");
    }
}
