//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and check traversal
//! order and bounds through the requests the server actually received.

use doc_harvest::config::UserAgentConfig;
use doc_harvest::crawler::{build_http_client, Crawler};
use reqwest::Client;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> Client {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    build_http_client(&user_agent, Duration::from_secs(5), 10).expect("Failed to build client")
}

/// HTML page whose body is one anchor per link
fn page_with_links(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Paths requested from the server, in arrival order
async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording disabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

fn page_paths(pages: &[doc_harvest::Page]) -> Vec<String> {
    pages
        .iter()
        .map(|page| url::Url::parse(&page.url).unwrap().path().to_string())
        .collect()
}

#[tokio::test]
async fn test_depth_first_link_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page_with_links("Home", &["/a", "/b"])).await;
    mount_page(&server, "/a", page_with_links("A", &["/c"])).await;
    mount_page(&server, "/b", page_with_links("B", &[])).await;
    mount_page(&server, "/c", page_with_links("C", &[])).await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let pages = crawler.crawl(&format!("{}/", server.uri())).await;

    assert_eq!(page_paths(&pages), vec!["/", "/a", "/c", "/b"]);
    assert_eq!(requested_paths(&server).await, vec!["/", "/a", "/c", "/b"]);
}

#[tokio::test]
async fn test_depth_bound() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page_with_links("Home", &["/a", "/b"])).await;
    mount_page(&server, "/a", page_with_links("A", &["/c"])).await;
    mount_page(&server, "/b", page_with_links("B", &[])).await;
    mount_page(&server, "/c", page_with_links("C", &[])).await;

    let mut crawler = Crawler::new(test_client(), 1, 50);
    let pages = crawler.crawl(&format!("{}/", server.uri())).await;

    assert_eq!(page_paths(&pages), vec!["/", "/a", "/b"]);
    assert!(!requested_paths(&server).await.contains(&"/c".to_string()));
}

#[tokio::test]
async fn test_page_limit_stops_fetching() {
    let server = MockServer::start().await;
    let links: Vec<String> = (0..15).map(|i| format!("/p{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_page(&server, "/", page_with_links("Home", &link_refs)).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_links("Leaf", &[])))
        .mount(&server)
        .await;

    let mut crawler = Crawler::new(test_client(), 3, 10);
    let pages = crawler.crawl(&format!("{}/", server.uri())).await;

    assert_eq!(pages.len(), 10);
    assert_eq!(requested_paths(&server).await.len(), 10);
}

#[tokio::test]
async fn test_other_host_not_followed() {
    let server = MockServer::start().await;
    let port = server.address().port();
    let foreign = format!("http://localhost:{}/other", port);
    mount_page(&server, "/", page_with_links("Home", &[&foreign, "/local"])).await;
    mount_page(&server, "/local", page_with_links("Local", &[])).await;
    mount_page(&server, "/other", page_with_links("Other", &[])).await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let pages = crawler.crawl(&format!("{}/", server.uri())).await;

    assert_eq!(page_paths(&pages), vec!["/", "/local"]);
    assert_eq!(requested_paths(&server).await, vec!["/", "/local"]);
}

#[tokio::test]
async fn test_failed_page_fetched_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page_with_links("Home", &["/missing", "/ok"])).await;
    mount_page(&server, "/ok", page_with_links("Ok", &["/missing", "/"])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let pages = crawler.crawl(&format!("{}/", server.uri())).await;

    assert_eq!(page_paths(&pages), vec!["/", "/ok"]);
    assert!(crawler.was_visited(&format!("{}/missing", server.uri())));
}

#[tokio::test]
async fn test_fragments_and_duplicates_collapse() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        page_with_links("Home", &["#top", "/#section", "/a#intro", "/a", "/a"]),
    )
    .await;
    mount_page(&server, "/a", page_with_links("A", &[])).await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let pages = crawler.crawl(&server.uri()).await;

    assert_eq!(page_paths(&pages), vec!["/", "/a"]);
    assert_eq!(requested_paths(&server).await, vec!["/", "/a"]);
}

#[tokio::test]
async fn test_seed_with_fragment_fetched_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page_with_links("Home", &["/", "/#intro"])).await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let pages = crawler.crawl(&format!("{}/#intro", server.uri())).await;

    assert_eq!(page_paths(&pages), vec!["/"]);
    assert_eq!(requested_paths(&server).await, vec!["/"]);
}

#[tokio::test]
async fn test_single_page_site() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page_with_links("Lonely", &[])).await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let pages = crawler.crawl(&format!("{}/", server.uri())).await;

    assert_eq!(pages.len(), 1);
    assert!(pages[0].content.contains("Lonely"));
}

#[tokio::test]
async fn test_state_resets_between_crawls() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page_with_links("Home", &["/a"])).await;
    mount_page(&server, "/a", page_with_links("A", &[])).await;

    let mut crawler = Crawler::new(test_client(), 3, 50);
    let seed = format!("{}/", server.uri());
    let first = crawler.crawl(&seed).await;
    let second = crawler.crawl(&seed).await;

    assert_eq!(page_paths(&first), page_paths(&second));
    assert_eq!(crawler.visited_count(), 2);
    assert_eq!(requested_paths(&server).await.len(), 4);
}

#[tokio::test]
async fn test_invalid_seeds_yield_nothing() {
    let mut crawler = Crawler::new(test_client(), 3, 50);

    assert!(crawler.crawl("not a url").await.is_empty());
    assert!(crawler.crawl("ftp://files.example.com/").await.is_empty());
    assert!(crawler.crawl("http://127.0.0.1:9/").await.is_empty());
}
