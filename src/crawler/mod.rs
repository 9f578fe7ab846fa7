//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with soft failures
//! - HTML link extraction and resolution
//! - The depth-first frontier
//! - The bounded, same-domain crawl itself

mod coordinator;
mod fetcher;
mod links;
mod scheduler;

pub use coordinator::{CrawlState, Crawler};
pub use fetcher::{build_http_client, fetch_html, fetch_url, FetchResult};
pub use links::extract_links;
pub use scheduler::{QueuedUrl, Scheduler};

use crate::config::Config;
use crate::model::Page;
use crate::HarvestError;
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;

/// Builds the session's HTTP client from the configuration
pub fn client_from_config(config: &Config) -> Result<Client, HarvestError> {
    Ok(build_http_client(
        &config.user_agent,
        Duration::from_secs(config.crawler.request_timeout),
        config.crawler.max_redirects,
    )?)
}

/// Crawls every seed and returns all pages in seed order
///
/// With `concurrent-seeds` each seed gets its own crawler (and so its own
/// visited set); all of them share `client`. Otherwise one crawler walks the
/// seeds one after another.
pub async fn crawl_seeds(client: &Client, config: &Config, seeds: &[String]) -> Vec<Page> {
    if config.crawler.concurrent_seeds {
        let crawls = seeds.iter().map(|seed| {
            let mut crawler = Crawler::from_config(client.clone(), &config.crawler);
            async move {
                let pages = crawler.crawl(seed).await;
                crawler.close();
                pages
            }
        });
        return join_all(crawls).await.into_iter().flatten().collect();
    }

    let mut crawler = Crawler::from_config(client.clone(), &config.crawler);
    let mut pages = Vec::new();
    for seed in seeds {
        pages.extend(crawler.crawl(seed).await);
    }
    crawler.close();
    pages
}
