//! Keyword-based module classification

use crate::config::ModuleRule;

/// Module name used when no keyword matches
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Ordered module classification table
///
/// The first rule with any keyword contained in the title or the page text
/// wins, so table order is priority order.
#[derive(Debug, Clone)]
pub struct ModuleClassifier {
    rules: Vec<ModuleRule>,
}

impl ModuleClassifier {
    /// Builds a classifier; keywords are lowercased once here
    pub fn new(rules: &[ModuleRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| ModuleRule {
                name: rule.name.clone(),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// Returns the module for a page with the given title and text
    pub fn identify_module(&self, title: &str, content: &str) -> &str {
        let title = title.to_lowercase();
        let content = content.to_lowercase();

        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|k| title.contains(k.as_str()) || content.contains(k.as_str()))
            })
            .map(|rule| rule.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }
}
