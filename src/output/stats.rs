//! Harvest statistics
//!
//! Counts collected by the pipeline and printed after a run.

use crate::model::CleanModule;

/// Harvest statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestStatistics {
    /// Number of seed URLs crawled
    pub seeds: usize,

    /// Pages fetched with non-empty content
    pub pages: usize,

    /// Raw module records extracted before deduplication
    pub raw_modules: usize,

    /// Modules in the final output
    pub modules: usize,

    /// Submodules across all output modules
    pub submodules: usize,

    /// Module descriptions rewritten by the enricher
    pub enriched: usize,

    /// Submodule count of each output module, in output order
    pub submodules_by_module: Vec<(String, usize)>,
}

impl HarvestStatistics {
    /// Derives output counts from the final module list
    pub fn with_output(mut self, modules: &[CleanModule]) -> Self {
        self.modules = modules.len();
        self.submodules = modules.iter().map(|m| m.submodules.len()).sum();
        self.submodules_by_module = modules
            .iter()
            .map(|m| (m.module.clone(), m.submodules.len()))
            .collect();
        self
    }

    /// Share of raw records that survived deduplication, in percent
    pub fn retention_rate(&self) -> f64 {
        if self.raw_modules == 0 {
            0.0
        } else {
            (self.modules as f64 / self.raw_modules as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Seeds crawled: {}", stats.seeds);
    println!("  Pages fetched: {}", stats.pages);
    println!("  Raw module records: {}", stats.raw_modules);
    println!("  Modules written: {}", stats.modules);
    println!("  Submodules written: {}", stats.submodules);
    if stats.enriched > 0 {
        println!("  Descriptions enriched: {}", stats.enriched);
    }
    println!();

    if !stats.submodules_by_module.is_empty() {
        println!("Submodules per Module:");
        for (module, count) in &stats.submodules_by_module {
            println!("  {}: {}", module, count);
        }
        println!();
    }

    println!(
        "Retention: {:.1}% ({} / {} records kept)",
        stats.retention_rate(),
        stats.modules,
        stats.raw_modules
    );
}
