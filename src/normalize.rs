//! Output normalization
//!
//! Deduplicates raw module records into clean ones:
//! - the first record per module name wins, later ones are dropped whole
//! - submodule names are cleaned, filtered against a stoplist, and split
//!   when they look like several titles glued together
//! - duplicate submodules keep the longest description
//!
//! All dedup state lives in the `clean_output` call, so independent runs
//! never share anything.

use crate::config::NormalizerConfig;
use crate::extract::placeholder_description;
use crate::extract::text::{normalize_text, truncate_with_ellipsis};
use crate::extract::DESCRIPTION_LEN;
use crate::model::{CleanModule, RawModule, Submodules};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Fragments must be longer than this to replace a split name
const MIN_FRAGMENT_LEN: usize = 2;

/// Deduplicating normalizer
#[derive(Debug, Clone)]
pub struct Normalizer {
    stoplist: HashSet<String>,
    split_triggers: Vec<String>,
    split_length: usize,
    capitalized_word: Regex,
    separators: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            stoplist: config.stoplist.iter().map(|s| s.to_lowercase()).collect(),
            split_triggers: config.split_triggers.clone(),
            split_length: config.split_length,
            capitalized_word: Regex::new(r"[A-Z][a-z]+").expect("static regex"),
            separators: Regex::new(r"[/\-\s]+").expect("static regex"),
        }
    }

    /// Deduplicates and cleans raw module records, preserving input order
    pub fn clean_output(&self, modules: &[RawModule]) -> Vec<CleanModule> {
        let mut seen_modules: HashSet<&str> = HashSet::new();
        let mut seen_submodules: HashMap<(String, String), String> = HashMap::new();
        let mut cleaned = Vec::new();

        for module in modules {
            if !seen_modules.insert(module.module.as_str()) {
                tracing::debug!("Dropping repeated module '{}'", module.module);
                continue;
            }

            let mut submodules = Submodules::new();
            for (raw_name, raw_description) in module.submodules.iter() {
                let Some(name) = self.clean_submodule_name(raw_name) else {
                    tracing::trace!("Rejected submodule '{}'", raw_name);
                    continue;
                };

                let mut description = normalize_text(raw_description);
                if description.is_empty() || description == name {
                    description = placeholder_description(&name);
                }

                let key = (module.module.clone(), name.clone());
                let replace = match seen_submodules.get(&key) {
                    None => true,
                    Some(previous) => description.len() > previous.len(),
                };
                if replace {
                    seen_submodules.insert(key, description.clone());
                    submodules.insert(name, description);
                }
            }

            cleaned.push(CleanModule {
                module: module.module.clone(),
                description: truncate_with_ellipsis(
                    &normalize_text(&module.description),
                    DESCRIPTION_LEN,
                ),
                submodules,
            });
        }

        cleaned
    }

    /// Cleans a submodule name, or returns None if it should be dropped
    pub fn clean_submodule_name(&self, raw: &str) -> Option<String> {
        let mut name = normalize_text(raw);
        if self.is_rejected(&name) {
            return None;
        }

        if self.needs_split(&name) {
            name = self.first_fragment(&name)?;
            if self.is_rejected(&name) {
                return None;
            }
        }

        Some(name)
    }

    fn is_rejected(&self, name: &str) -> bool {
        name.is_empty() || self.stoplist.contains(&name.to_lowercase())
    }

    fn needs_split(&self, name: &str) -> bool {
        name.len() > self.split_length
            || self
                .split_triggers
                .iter()
                .any(|trigger| name.contains(trigger.as_str()))
    }

    /// Splits on separators and capitalized-word boundaries, returning the
    /// first fragment longer than two characters
    pub fn first_fragment(&self, name: &str) -> Option<String> {
        self.separators
            .split(name)
            .flat_map(|chunk| self.capitalized_fragments(chunk))
            .map(str::trim)
            .find(|fragment| fragment.len() > MIN_FRAGMENT_LEN)
            .map(str::to_string)
    }

    /// Breaks a chunk into capitalized words and the text between them
    fn capitalized_fragments<'a>(&self, chunk: &'a str) -> Vec<&'a str> {
        let mut fragments = Vec::new();
        let mut last = 0;
        for word in self.capitalized_word.find_iter(chunk) {
            if word.start() > last {
                fragments.push(&chunk[last..word.start()]);
            }
            fragments.push(word.as_str());
            last = word.end();
        }
        if last < chunk.len() {
            fragments.push(&chunk[last..]);
        }
        fragments
    }
}
