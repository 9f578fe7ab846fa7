//! Module extraction from crawled pages
//!
//! Turns one page's HTML into a raw module record:
//! - a main title (first `h1`/`title`/`header`, else first `h2`, else the URL)
//! - a module classification from the keyword table
//! - submodule title/description pairs from the structural selectors
//! - a short description taken from the start of the page text

mod classify;
mod submodules;
pub mod text;

pub use classify::{ModuleClassifier, UNCATEGORIZED};
pub use submodules::{extract_submodules, placeholder_description};

use crate::config::{parse_selector, ExtractorConfig};
use crate::model::{Page, RawModule};
use crate::ConfigError;
use scraper::{Html, Selector};
use text::{clean_text, normalize_text, truncate_with_ellipsis, visible_text};

/// Length of the page-level description before the ellipsis
pub const DESCRIPTION_LEN: usize = 100;

/// Extracts raw module records from pages
#[derive(Debug, Clone)]
pub struct ModuleExtractor {
    classifier: ModuleClassifier,
    selectors: Vec<Selector>,
    title_selector: Selector,
    fallback_title_selector: Selector,
}

impl ModuleExtractor {
    /// Builds an extractor from the configured tables
    ///
    /// Fails if any structural selector does not parse.
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        let selectors = config
            .selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            classifier: ModuleClassifier::new(&config.modules),
            selectors,
            title_selector: parse_selector("h1, title, header")?,
            fallback_title_selector: parse_selector("h2")?,
        })
    }

    /// Parses one page into at most one raw module
    ///
    /// Empty content (a failed fetch) yields nothing; any other page yields
    /// exactly one record.
    pub fn parse_page(&self, page: &Page) -> Vec<RawModule> {
        if page.content.is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(&page.content);

        let main_title = self
            .main_title(&document)
            .unwrap_or_else(|| page.url.clone());
        let page_text = normalize_text(&visible_text(document.root_element(), " "));
        let module = self.identify_module(&main_title, &page_text).to_string();
        let submodules = extract_submodules(&document, &self.selectors);

        tracing::debug!(
            "{} classified as '{}' with {} submodule candidates",
            page.url,
            module,
            submodules.len()
        );

        vec![RawModule {
            module,
            description: truncate_with_ellipsis(&page_text, DESCRIPTION_LEN),
            submodules,
            source_url: page.url.clone(),
            page_title: main_title,
            page_text,
        }]
    }

    /// Classifies a page by its title and text
    pub fn identify_module(&self, title: &str, content: &str) -> &str {
        self.classifier.identify_module(title, content)
    }

    fn main_title(&self, document: &Html) -> Option<String> {
        document
            .select(&self.title_selector)
            .next()
            .or_else(|| document.select(&self.fallback_title_selector).next())
            .map(|element| clean_text(&visible_text(element, "")))
    }
}
