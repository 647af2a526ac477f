//! Kumo: a bounded-depth concurrent web crawler
//!
//! This crate implements a breadth-first web crawler that starts from a seed
//! URL, follows hyperlinks up to a configurable depth under a concurrency
//! limit, and aggregates per-URL results and run-level statistics into a
//! final report.

pub mod config;
pub mod crawler;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Kumo operations
///
/// Per-URL failures (network errors, parse errors) are never surfaced here;
/// they are recorded in the crawl results and the run continues. This type
/// covers failures that prevent the crawl itself from making progress.
#[derive(Debug, Error)]
pub enum KumoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Crawl task failed: {0}")]
    TaskJoin(String),

    #[error("Report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("Could not read blacklist file '{path}': {source}")]
    BlacklistFile {
        path: String,
        source: std::io::Error,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Result type alias for Kumo operations
pub type Result<T> = std::result::Result<T, KumoError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{Coordinator, FrontierItem};
pub use report::{CrawlReport, CrawlResult, CrawlStats};
