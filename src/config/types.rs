use serde::Deserialize;

/// Main configuration structure for Doc-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// URLs to start crawling from
    #[serde(default)]
    pub seeds: Vec<String>,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub enricher: EnricherConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link depth to follow from each seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages collected per seed URL
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Crawl seeds concurrently, one crawler per seed
    #[serde(rename = "concurrent-seeds")]
    pub concurrent_seeds: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 50,
            request_timeout: 10,
            max_redirects: 10,
            concurrent_seeds: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "DocHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/doc-harvest".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON document of harvested modules
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Optional path to a markdown report
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "outputs/documentation_modules.json".to_string(),
            summary_path: None,
        }
    }
}

/// One row of the module classification table
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ModuleRule {
    /// Module name assigned when a keyword matches
    pub name: String,

    /// Keywords, matched case-insensitively as substrings
    pub keywords: Vec<String>,
}

impl ModuleRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Module extraction tables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Ordered classification table; first matching module wins
    pub modules: Vec<ModuleRule>,

    /// Structural selectors tried in order for submodule candidates
    pub selectors: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            modules: default_module_rules(),
            selectors: [
                "article",
                "section",
                "div.article-body",
                "div.support-content",
                "div.knowledge-base",
                "li",
                "h1",
                "h2",
                "h3",
                "a",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// The shipped documentation categories
pub fn default_module_rules() -> Vec<ModuleRule> {
    vec![
        ModuleRule::new(
            "Getting Started",
            &["getting started", "welcome", "onboarding", "setup"],
        ),
        ModuleRule::new(
            "Application Management",
            &["application", "app", "agent", "license", "browser", "desktop"],
        ),
        ModuleRule::new("User Management", &["user", "employee", "department", "role"]),
        ModuleRule::new(
            "Cost Management",
            &["cost", "spend", "contract", "license", "optimization", "transaction"],
        ),
        ModuleRule::new(
            "Access Provisioning",
            &["provisioning", "onboarding", "offboarding"],
        ),
        ModuleRule::new("Access Requests", &["access", "request", "catalog"]),
        ModuleRule::new("Access Reviews", &["review", "audit", "compliance"]),
        ModuleRule::new("Integrations", &["integration", "connect", "api", "sdk"]),
        ModuleRule::new(
            "Workflows and Automations",
            &["workflow", "automation", "playbook"],
        ),
        ModuleRule::new(
            "Settings",
            &["setting", "configuration", "saml", "billing", "account"],
        ),
        ModuleRule::new(
            "WordPress Documentation",
            &["wordpress", "gutenberg", "block", "theme"],
        ),
        ModuleRule::new(
            "Chargebee Documentation",
            &["chargebee", "billing", "subscription", "payment"],
        ),
        ModuleRule::new(
            "Neo Documentation",
            &["neo", "knowledge base", "support", "ticket"],
        ),
    ]
}

/// Normalization tables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Submodule names rejected outright (case-insensitive)
    pub stoplist: Vec<String>,

    /// Substrings that mark a submodule name as glued together
    #[serde(rename = "split-triggers")]
    pub split_triggers: Vec<String>,

    /// Names longer than this are split as well
    #[serde(rename = "split-length")]
    pub split_length: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            stoplist: vec!["untitled".to_string(), "manage apps".to_string()],
            split_triggers: ["Windows", "MacOS", "Contracts", "Agent"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            split_length: 30,
        }
    }
}

/// Description enrichment configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnricherConfig {
    /// Whether descriptions are rewritten at all
    pub enabled: bool,

    /// Base URL of the chat-completions API
    #[serde(rename = "api-base")]
    pub api_base: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens generated per description
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Maximum prompt content size, in words
    #[serde(rename = "token-budget")]
    pub token_budget: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.3,
            max_tokens: 100,
            token_budget: 3000,
            request_timeout: 30,
        }
    }
}
