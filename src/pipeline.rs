//! End-to-end harvest: crawl, extract, normalize, optionally enrich

use crate::config::{Config, OutputConfig};
use crate::crawler::{client_from_config, crawl_seeds};
use crate::enrich::DescriptionEnricher;
use crate::extract::text::truncate_with_ellipsis;
use crate::extract::{ModuleExtractor, DESCRIPTION_LEN};
use crate::model::{CleanModule, RawModule};
use crate::normalize::Normalizer;
use crate::output::{generate_markdown_summary, write_json, HarvestStatistics};
use crate::Result;
use std::path::Path;

/// Result of one harvest run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub modules: Vec<CleanModule>,
    pub stats: HarvestStatistics,
}

/// Runs the whole pipeline for `seeds`
///
/// Individual fetch, seed and enrichment failures are logged and shrink the
/// result; only client construction and invalid extractor selectors fail.
pub async fn harvest(config: &Config, seeds: &[String]) -> Result<HarvestReport> {
    let extractor = ModuleExtractor::new(&config.extractor)?;
    let client = client_from_config(config)?;

    let pages = crawl_seeds(&client, config, seeds).await;
    drop(client);
    tracing::info!("Crawled {} pages from {} seeds", pages.len(), seeds.len());

    let raw: Vec<RawModule> = pages
        .iter()
        .flat_map(|page| extractor.parse_page(page))
        .collect();

    let mut modules = Normalizer::new(&config.normalizer).clean_output(&raw);

    let enriched = if config.enricher.enabled {
        let mut enricher = DescriptionEnricher::from_config(&config.enricher);
        enrich_modules(&mut enricher, &mut modules, &raw).await
    } else {
        0
    };

    let stats = HarvestStatistics {
        seeds: seeds.len(),
        pages: pages.len(),
        raw_modules: raw.len(),
        enriched,
        ..Default::default()
    }
    .with_output(&modules);

    tracing::info!(
        "Harvested {} modules with {} submodules",
        stats.modules,
        stats.submodules
    );

    Ok(HarvestReport { modules, stats })
}

/// Writes the JSON document and, when configured, the markdown report
pub fn write_outputs(report: &HarvestReport, config: &OutputConfig) -> Result<()> {
    let json_path = Path::new(&config.json_path);
    write_json(&report.modules, json_path)?;
    tracing::info!("Modules written to: {}", json_path.display());

    if let Some(summary_path) = &config.summary_path {
        generate_markdown_summary(&report.modules, Path::new(summary_path))?;
        tracing::info!("Summary written to: {}", summary_path);
    }

    Ok(())
}

/// Rewrites each module description from the page that produced it
///
/// Returns the number of modules whose description was replaced.
pub async fn enrich_modules(
    enricher: &mut DescriptionEnricher,
    modules: &mut [CleanModule],
    raw: &[RawModule],
) -> usize {
    let mut enriched = 0;

    for module in modules.iter_mut() {
        // The first record per name is the one the normalizer kept
        let Some(source) = raw.iter().find(|r| r.module == module.module) else {
            continue;
        };

        enricher.add_context(&source.page_title, &source.source_url);
        let description = enricher.generate_description(&source.page_text).await;
        module.description = truncate_with_ellipsis(&description, DESCRIPTION_LEN);
        enriched += 1;
    }

    enriched
}
