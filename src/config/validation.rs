use crate::config::types::{
    Config, CrawlerConfig, EnricherConfig, ExtractorConfig, NormalizerConfig, OutputConfig,
    UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_extractor_config(&config.extractor)?;
    validate_normalizer_config(&config.normalizer)?;
    validate_enricher_config(&config.enricher)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !(1..=5).contains(&config.max_depth) {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and 5, got {}",
            config.max_depth
        )));
    }

    if !(10..=100).contains(&config.max_pages) {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 10 and 100, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates the classification table and structural selectors
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    for rule in &config.modules {
        if rule.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "module name cannot be empty".to_string(),
            ));
        }

        if rule.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "module '{}' must have at least one keyword",
                rule.name
            )));
        }
    }

    if config.selectors.is_empty() {
        return Err(ConfigError::Validation(
            "at least one submodule selector is required".to_string(),
        ));
    }

    for selector in &config.selectors {
        parse_selector(selector)?;
    }

    Ok(())
}

/// Validates normalization tables
fn validate_normalizer_config(config: &NormalizerConfig) -> Result<(), ConfigError> {
    if config.split_length == 0 {
        return Err(ConfigError::Validation(
            "split_length must be >= 1".to_string(),
        ));
    }

    if config.split_triggers.iter().any(|t| t.is_empty()) {
        return Err(ConfigError::Validation(
            "split_triggers cannot contain empty strings".to_string(),
        ));
    }

    Ok(())
}

/// Validates enrichment settings
///
/// Only checked when enrichment is enabled.
fn validate_enricher_config(config: &EnricherConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_base: {}", e)))?;

    if config.model.is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0 and 2, got {}",
            config.temperature
        )));
    }

    if config.max_tokens == 0 || config.token_budget == 0 || config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "max_tokens, token_budget and request_timeout must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Parses a CSS selector, mapping failures to a config error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
