//! Doc-Harvest: a documentation module harvester
//!
//! This crate crawls a documentation site from seed URLs, classifies every
//! crawled page into a documentation module, extracts the submodule entries
//! found on it, and deduplicates the result into a JSON-ready structure.
//! Descriptions can optionally be rewritten by a text-generation service.

pub mod config;
pub mod crawler;
pub mod enrich;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Doc-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Doc-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Crawler;
pub use enrich::DescriptionEnricher;
pub use extract::ModuleExtractor;
pub use model::{CleanModule, Page, RawModule, Submodules};
pub use normalize::Normalizer;
pub use pipeline::{harvest, write_outputs, HarvestReport};
pub use url::{extract_domain, same_site, validate_seed};
