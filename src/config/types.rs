use serde::Deserialize;
use std::collections::HashSet;

/// Extensions blacklisted by default when no blacklist is supplied
///
/// Covers static assets and binary downloads that a link-mapping crawl has
/// no use for. An explicitly supplied (even empty) blacklist replaces this
/// set entirely.
pub const DEFAULT_BLACKLIST_EXTENSIONS: &[&str] = &[
    ".7z", ".avi", ".bmp", ".css", ".dmg", ".doc", ".docx", ".eot", ".exe", ".flv", ".gif",
    ".gz", ".ico", ".iso", ".jpeg", ".jpg", ".js", ".mkv", ".mov", ".mp3", ".mp4", ".ogg",
    ".pdf", ".png", ".ppt", ".pptx", ".rar", ".svg", ".tar", ".ttf", ".wav", ".webm", ".webp",
    ".wmv", ".woff", ".woff2", ".xls", ".xlsx", ".zip",
];

/// Configuration for a single crawl run
///
/// Read-only for the duration of the run and shared by every component.
/// Built either from CLI flags or from a TOML file with kebab-case keys.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// The URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum link depth to follow (0 crawls only the seed)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Hosts links may point to; empty means unrestricted
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: HashSet<String>,

    /// Path extensions that disqualify a link from being crawled
    ///
    /// Entries are lowercase and carry a leading dot.
    #[serde(
        rename = "blacklisted-extensions",
        default = "default_blacklist_extensions"
    )]
    pub blacklisted_extensions: HashSet<String>,

    /// Maximum number of simultaneous fetches
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom User-Agent header; a crate-derived default is used when unset
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,

    /// Whether to verify TLS certificates
    #[serde(rename = "verify-tls", default = "default_verify_tls")]
    pub verify_tls: bool,
}

impl CrawlConfig {
    /// Creates a configuration with default settings for the given seed URL
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth: default_max_depth(),
            allowed_domains: HashSet::new(),
            blacklisted_extensions: default_blacklist_extensions(),
            max_concurrency: default_max_concurrency(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            verify_tls: default_verify_tls(),
        }
    }
}

pub(crate) fn default_blacklist_extensions() -> HashSet<String> {
    DEFAULT_BLACKLIST_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_max_depth() -> u32 {
    1
}

fn default_max_concurrency() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_verify_tls() -> bool {
    true
}
