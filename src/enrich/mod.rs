//! Description enrichment
//!
//! Rewrites a module description as a 1-2 sentence summary produced by a
//! text generator. Generation is best effort: any failure, or no generator
//! at all, falls back to picking the first meaningful sentence of the page.

mod generator;

pub use generator::{EnrichError, OpenAiGenerator, SamplingParams, TextGenerator};

use crate::config::EnricherConfig;
use crate::extract::text::collapse_whitespace;
use regex::Regex;
use std::collections::VecDeque;

/// Number of recent pages kept as prompt context
pub const CONTEXT_WINDOW: usize = 5;

/// Returned for empty input content
pub const NO_CONTENT: &str = "No description available";

/// Returned when the fallback finds no usable sentence
pub const NOT_AVAILABLE: &str = "Description not available";

/// Maximum length of a fallback sentence
const FALLBACK_LEN: usize = 200;

/// Sentences need more words than this to be used as a fallback
const MIN_SENTENCE_WORDS: usize = 5;

/// Generates module descriptions
pub struct DescriptionEnricher {
    generator: Option<Box<dyn TextGenerator>>,
    params: SamplingParams,
    token_budget: usize,
    context: VecDeque<String>,
    citation: Regex,
    label: Regex,
}

impl DescriptionEnricher {
    /// Creates an enricher; `None` means fallback-only
    pub fn new(
        generator: Option<Box<dyn TextGenerator>>,
        params: SamplingParams,
        token_budget: usize,
    ) -> Self {
        Self {
            generator,
            params,
            token_budget,
            context: VecDeque::with_capacity(CONTEXT_WINDOW),
            citation: Regex::new(r"\[\d+\]|\([A-Za-z]+,?\s*\d{4}\)").expect("static regex"),
            label: Regex::new(r"^Description:\s*").expect("static regex"),
        }
    }

    /// Creates an enricher from configuration
    ///
    /// A missing API key is logged and leaves the enricher in fallback-only
    /// mode.
    pub fn from_config(config: &EnricherConfig) -> Self {
        let generator = match OpenAiGenerator::from_config(config) {
            Ok(generator) => Some(Box::new(generator) as Box<dyn TextGenerator>),
            Err(e) => {
                tracing::warn!("Text generation unavailable, using extractive fallback: {}", e);
                None
            }
        };

        Self::new(
            generator,
            SamplingParams {
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
            config.token_budget,
        )
    }

    /// Records a page as context for later prompts, evicting the oldest
    pub fn add_context(&mut self, page_title: &str, url: &str) {
        if self.context.len() == CONTEXT_WINDOW {
            self.context.pop_front();
        }
        self.context.push_back(format!("Page: {} ({})", page_title, url));
    }

    /// Current context entries, oldest first
    pub fn context(&self) -> impl Iterator<Item = &str> {
        self.context.iter().map(String::as_str)
    }

    /// Produces a short description of `content`
    ///
    /// Never fails; generation errors fall back to the extractive path.
    pub async fn generate_description(&self, content: &str) -> String {
        if content.trim().is_empty() {
            return NO_CONTENT.to_string();
        }

        let content = preprocess_content(content);

        let Some(generator) = &self.generator else {
            return self.fallback_description(&content);
        };

        let prompt = self.build_prompt(&truncate_words(&content, self.token_budget));
        match generator.generate(&prompt, &self.params).await {
            Ok(text) => self.postprocess_description(&text),
            Err(e) => {
                tracing::error!("Error generating description: {}", e);
                self.fallback_description(&content)
            }
        }
    }

    fn build_prompt(&self, content: &str) -> String {
        let context = self.context.iter().cloned().collect::<Vec<_>>().join("\n");
        format!(
            "You are a technical documentation analyzer. \
             Generate a concise 1-2 sentence description summarizing \
             the key purpose and functionality of this documentation section.\n\n\
             Context:\n{}\n\nContent:\n{}\n\nDescription:",
            context, content
        )
    }

    /// Strips a leading label, normalizes quotes and ends the text with a period
    pub fn postprocess_description(&self, text: &str) -> String {
        let mut text = self
            .label
            .replace(text.trim(), "")
            .replace(['"', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'], "'");
        if !text.ends_with('.') {
            text.push('.');
        }
        text
    }

    /// First sentence with more than five words that is not a citation
    pub fn fallback_description(&self, content: &str) -> String {
        content
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .find(|sentence| {
                sentence.split_whitespace().count() > MIN_SENTENCE_WORDS
                    && !self.is_citation(sentence)
            })
            .map(|sentence| sentence.chars().take(FALLBACK_LEN).collect())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// True for text carrying a `[12]` or `(Name, 2020)` style reference
    pub fn is_citation(&self, text: &str) -> bool {
        self.citation.is_match(text)
    }
}

/// Normalizes line endings, non-breaking spaces and whitespace runs
fn preprocess_content(text: &str) -> String {
    collapse_whitespace(&text.replace("\r\n", "\n").replace('\u{a0}', " "))
}

/// Keeps at most `budget` whitespace-delimited tokens
fn truncate_words(text: &str, budget: usize) -> String {
    text.split_whitespace()
        .take(budget)
        .collect::<Vec<_>>()
        .join(" ")
}
