//! Integration tests for the full harvest pipeline
//!
//! A small documentation site is served by wiremock; the chat-completions
//! endpoint used for enrichment is mocked on the same server.

use doc_harvest::config::Config;
use doc_harvest::output::{generate_markdown_summary, write_json};
use doc_harvest::{harvest, CleanModule};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Three pages: a getting-started index linking two application pages
async fn docs_site() -> MockServer {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><head><title>Getting Started</title></head><body>
           <h2>Quick tour</h2><p>Take a short tour of the product.</p>
           <a href="/apps">Installing</a>
           <a href="/apps-more">More installing</a>
           </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/apps",
        r#"<html><head><title>Application Management</title></head><body>
           <h2>Install apps</h2><p>Deploy the desktop agent to laptops.</p>
           </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/apps-more",
        r#"<html><head><title>Application Management</title></head><body>
           <h2>Remove apps</h2><p>Uninstall from laptops.</p>
           </body></html>"#,
    )
    .await;

    server
}

fn module<'a>(modules: &'a [CleanModule], name: &str) -> &'a CleanModule {
    modules
        .iter()
        .find(|m| m.module == name)
        .unwrap_or_else(|| panic!("module {} missing", name))
}

#[tokio::test]
async fn test_full_harvest() {
    let server = docs_site().await;
    let config = Config::default();

    let report = harvest(&config, &[format!("{}/", server.uri())])
        .await
        .expect("Harvest failed");

    let names: Vec<_> = report.modules.iter().map(|m| m.module.as_str()).collect();
    assert_eq!(names, vec!["Getting Started", "Application Management"]);

    let started = module(&report.modules, "Getting Started");
    assert!(started.description.starts_with("Getting Started Quick tour"));
    assert_eq!(
        started.submodules.get("Quick tour"),
        Some("Take a short tour of the product.")
    );
    assert_eq!(
        started.submodules.get("Installing"),
        Some("Details for Installing")
    );

    // Only the first Application Management page contributes
    let apps = module(&report.modules, "Application Management");
    assert_eq!(
        apps.submodules.get("Install apps"),
        Some("Deploy the desktop agent to laptops.")
    );
    assert!(!apps.submodules.contains("Remove apps"));

    assert_eq!(report.stats.seeds, 1);
    assert_eq!(report.stats.pages, 3);
    assert_eq!(report.stats.raw_modules, 3);
    assert_eq!(report.stats.modules, 2);
    assert_eq!(report.stats.enriched, 0);
}

#[tokio::test]
async fn test_invalid_seed_does_not_abort() {
    let server = docs_site().await;
    let config = Config::default();
    let seeds = vec!["not a url".to_string(), format!("{}/apps", server.uri())];

    let report = harvest(&config, &seeds).await.expect("Harvest failed");

    assert_eq!(report.stats.seeds, 2);
    assert_eq!(report.stats.pages, 1);
    assert_eq!(report.modules.len(), 1);
    assert_eq!(report.modules[0].module, "Application Management");
}

#[tokio::test]
async fn test_concurrent_seeds_keep_seed_order() {
    let server = docs_site().await;
    let mut config = Config::default();
    config.crawler.concurrent_seeds = true;
    let seeds = vec![
        format!("{}/apps-more", server.uri()),
        format!("{}/apps", server.uri()),
    ];

    let report = harvest(&config, &seeds).await.expect("Harvest failed");

    assert_eq!(report.stats.pages, 2);
    let apps = module(&report.modules, "Application Management");
    assert!(apps.submodules.contains("Remove apps"));
    assert!(!apps.submodules.contains("Install apps"));
}

#[tokio::test]
async fn test_enrichment_rewrites_descriptions() {
    let server = docs_site().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer pipeline-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Description: Helps teams \"begin\""}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    std::env::set_var("DOC_HARVEST_ENRICH_TEST_KEY", "pipeline-test-key");
    let mut config = Config::default();
    config.enricher.enabled = true;
    config.enricher.api_base = format!("{}/v1", server.uri());
    config.enricher.api_key_env = "DOC_HARVEST_ENRICH_TEST_KEY".to_string();

    let report = harvest(&config, &[format!("{}/", server.uri())])
        .await
        .expect("Harvest failed");

    assert_eq!(report.stats.enriched, 2);
    for module in &report.modules {
        assert_eq!(module.description, "Helps teams 'begin'.");
    }
}

#[tokio::test]
async fn test_enrichment_failure_falls_back() {
    let server = docs_site().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    std::env::set_var("DOC_HARVEST_FAILING_TEST_KEY", "pipeline-test-key");
    let mut config = Config::default();
    config.enricher.enabled = true;
    config.enricher.api_base = format!("{}/v1", server.uri());
    config.enricher.api_key_env = "DOC_HARVEST_FAILING_TEST_KEY".to_string();

    let report = harvest(&config, &[format!("{}/", server.uri())])
        .await
        .expect("Harvest failed");

    assert_eq!(
        module(&report.modules, "Getting Started").description,
        "Getting Started Quick tour Take a short tour of the product"
    );
    assert_eq!(
        module(&report.modules, "Application Management").description,
        "Application Management Install apps Deploy the desktop agent to laptops"
    );
}

#[tokio::test]
async fn test_enrichment_timeout_falls_back() {
    let server = docs_site().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Too late"}}]
                }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    std::env::set_var("DOC_HARVEST_SLOW_TEST_KEY", "pipeline-test-key");
    let mut config = Config::default();
    config.enricher.enabled = true;
    config.enricher.api_base = format!("{}/v1", server.uri());
    config.enricher.api_key_env = "DOC_HARVEST_SLOW_TEST_KEY".to_string();
    config.enricher.request_timeout = 1;

    let report = harvest(&config, &[format!("{}/apps", server.uri())])
        .await
        .expect("Harvest failed");

    assert_eq!(report.stats.enriched, 1);
    assert_eq!(
        report.modules[0].description,
        "Application Management Install apps Deploy the desktop agent to laptops"
    );
}

#[tokio::test]
async fn test_missing_api_key_skips_service() {
    let server = docs_site().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.enricher.enabled = true;
    config.enricher.api_base = format!("{}/v1", server.uri());
    config.enricher.api_key_env = "DOC_HARVEST_KEY_THAT_IS_NEVER_SET".to_string();

    let report = harvest(&config, &[format!("{}/apps", server.uri())])
        .await
        .expect("Harvest failed");

    assert_eq!(report.stats.enriched, 1);
    assert_eq!(
        report.modules[0].description,
        "Application Management Install apps Deploy the desktop agent to laptops"
    );
}

#[tokio::test]
async fn test_outputs_written() {
    let server = docs_site().await;
    let report = harvest(&Config::default(), &[format!("{}/", server.uri())])
        .await
        .expect("Harvest failed");

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("outputs").join("documentation_modules.json");
    let summary_path = dir.path().join("summary.md");

    write_json(&report.modules, &json_path).unwrap();
    generate_markdown_summary(&report.modules, &summary_path).unwrap();

    let json = std::fs::read_to_string(&json_path).unwrap();
    let parsed: Vec<CleanModule> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report.modules);

    // Submodule keys keep extraction order
    let tour = json.find("\"Quick tour\"").unwrap();
    let installing = json.find("\"Installing\"").unwrap();
    assert!(tour < installing);

    let summary = std::fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("## Getting Started"));
    assert!(summary.contains("| Install apps | Deploy the desktop agent to laptops. |"));
}
