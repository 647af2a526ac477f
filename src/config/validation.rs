use crate::config::CrawlConfig;
use crate::url::normalize_absolute;
use crate::ConfigError;

/// Validates a crawl configuration
///
/// Checks that the seed URL is a crawlable absolute HTTP(S) URL, that the
/// concurrency limit is sane, and that every blacklist entry is in the
/// canonical form the filter compares against.
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    normalize_absolute(&config.seed_url).map_err(|e| ConfigError::InvalidSeedUrl {
        url: config.seed_url.clone(),
        reason: e.to_string(),
    })?;

    if config.max_concurrency < 1 || config.max_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 1 and 100, got {}",
            config.max_concurrency
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be at least 1".to_string(),
        ));
    }

    for ext in &config.blacklisted_extensions {
        if !ext.starts_with('.') || *ext != ext.to_lowercase() {
            return Err(ConfigError::Validation(format!(
                "blacklist extension '{}' must be lowercase with a leading dot",
                ext
            )));
        }
    }

    for domain in &config.allowed_domains {
        if domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "allowed domain entries cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
