//! Doc-Harvest main entry point
//!
//! This is the command-line interface for the documentation module harvester.

use anyhow::Context;
use clap::Parser;
use doc_harvest::config::{load_config_with_hash, validate, Config};
use doc_harvest::output::print_statistics;
use doc_harvest::{harvest, write_outputs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Doc-Harvest: a documentation module harvester
///
/// Doc-Harvest crawls a documentation site from seed URLs, classifies each
/// page into a documentation module, collects its submodules, and writes
/// the deduplicated result as JSON.
#[derive(Parser, Debug)]
#[command(name = "doc-harvest")]
#[command(version)]
#[command(about = "A documentation module harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL to crawl (repeatable, added to the configured seeds)
    #[arg(short = 'u', long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// Maximum link depth from each seed (1-5)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum pages collected per seed (10-100)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Path of the JSON output document
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Rewrite module descriptions with the text generation service
    #[arg(long)]
    enrich: bool,

    /// Validate config and show what would be harvested without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if config.seeds.is_empty() {
        anyhow::bail!("No seed URLs given; pass --url or set `seeds` in the config file");
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_harvest=info,warn"),
            1 => EnvFilter::new("doc_harvest=debug,info"),
            2 => EnvFilter::new("doc_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line values win over the file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    config.seeds.extend(cli.urls.iter().cloned());

    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    if let Some(pages) = cli.max_pages {
        config.crawler.max_pages = pages;
    }
    if let Some(output) = &cli.output {
        config.output.json_path = output.display().to_string();
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }
    if cli.enrich {
        config.enricher.enabled = true;
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    print!("{}", format_dry_run(config));
}

/// Renders the effective configuration and what would be crawled
fn format_dry_run(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("=== Doc-Harvest Dry Run ===\n\n");

    out.push_str("Crawler Configuration:\n");
    out.push_str(&format!("  Max depth: {}\n", config.crawler.max_depth));
    out.push_str(&format!("  Max pages per seed: {}\n", config.crawler.max_pages));
    out.push_str(&format!("  Request timeout: {}s\n", config.crawler.request_timeout));
    out.push_str(&format!("  Max redirects: {}\n", config.crawler.max_redirects));
    out.push_str(&format!("  Concurrent seeds: {}\n", config.crawler.concurrent_seeds));

    out.push_str("\nUser Agent:\n");
    out.push_str(&format!("  Name: {}\n", config.user_agent.crawler_name));
    out.push_str(&format!("  Version: {}\n", config.user_agent.crawler_version));
    out.push_str(&format!("  Contact URL: {}\n", config.user_agent.contact_url));
    out.push_str(&format!("  Contact Email: {}\n", config.user_agent.contact_email));

    out.push_str("\nOutput:\n");
    out.push_str(&format!("  JSON: {}\n", config.output.json_path));
    match &config.output.summary_path {
        Some(path) => out.push_str(&format!("  Summary: {}\n", path)),
        None => out.push_str("  Summary: (none)\n"),
    }

    out.push_str(&format!(
        "\nModule Categories ({}):\n",
        config.extractor.modules.len()
    ));
    for rule in &config.extractor.modules {
        out.push_str(&format!("  - {}: {}\n", rule.name, rule.keywords.join(", ")));
    }

    out.push_str(&format!(
        "\nSelectors: {}\n",
        config.extractor.selectors.join(", ")
    ));

    if config.enricher.enabled {
        out.push_str("\nEnrichment:\n");
        out.push_str(&format!("  Endpoint: {}\n", config.enricher.api_base));
        out.push_str(&format!("  Model: {}\n", config.enricher.model));
        out.push_str(&format!("  Key variable: ${}\n", config.enricher.api_key_env));
    }

    out.push_str(&format!("\nSeeds ({}):\n", config.seeds.len()));
    for seed in &config.seeds {
        out.push_str(&format!("  * {}\n", seed));
    }

    out.push_str("\n✓ Configuration is valid\n");
    out.push_str(&format!(
        "✓ Would start crawling with {} seed URLs\n",
        config.seeds.len()
    ));

    out
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting harvest of {} seed URLs", config.seeds.len());

    let report = match harvest(config, &config.seeds).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = write_outputs(&report, &config.output) {
        tracing::error!("Failed to write output: {}", e);
        return Err(e.into());
    }

    print_statistics(&report.stats);

    Ok(())
}
