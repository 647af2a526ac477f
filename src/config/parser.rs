use crate::config::blacklist::normalize_extension;
use crate::config::validation::validate;
use crate::config::CrawlConfig;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a crawl configuration from a TOML file
///
/// Blacklist extensions from the file are normalized (lowercase, leading
/// dot) before validation, so the file may list them in any casing.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use kumo::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Max depth: {}", config.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: CrawlConfig = toml::from_str(&content)?;

    config.blacklisted_extensions = config
        .blacklisted_extensions
        .iter()
        .filter_map(|e| normalize_extension(e))
        .collect();

    config.allowed_domains = config
        .allowed_domains
        .iter()
        .map(|d| d.trim().to_lowercase())
        .collect();

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config() {
        let file = create_temp_config(r#"seed-url = "https://example.com/""#);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.seed_url, "https://example.com/");
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_concurrency, 10);
        // Defaults apply when the file doesn't list a blacklist
        assert!(config.blacklisted_extensions.contains(".jpg"));
    }

    #[test]
    fn test_load_full_config() {
        let file = create_temp_config(
            r#"
seed-url = "https://example.com/"
max-depth = 3
allowed-domains = ["Example.com", "other.org"]
blacklisted-extensions = ["JPG", ".png"]
max-concurrency = 4
timeout-secs = 5
user-agent = "TestBot/1.0"
verify-tls = false
"#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.max_depth, 3);
        assert!(config.allowed_domains.contains("example.com"));
        assert!(config.allowed_domains.contains("other.org"));
        assert!(config.blacklisted_extensions.contains(".jpg"));
        assert!(config.blacklisted_extensions.contains(".png"));
        assert_eq!(config.blacklisted_extensions.len(), 2);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent.as_deref(), Some("TestBot/1.0"));
        assert!(!config.verify_tls);
    }

    #[test]
    fn test_empty_blacklist_overrides_defaults() {
        let file = create_temp_config(
            r#"
seed-url = "https://example.com/"
blacklisted-extensions = []
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert!(config.blacklisted_extensions.is_empty());
    }

    #[test]
    fn test_load_nonexistent_path() {
        let result = load_config(Path::new("/nonexistent/crawl.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_failing_validation() {
        let file = create_temp_config(
            r#"
seed-url = "https://example.com/"
max-concurrency = 0
"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_bad_seed() {
        let file = create_temp_config(r#"seed-url = "mailto:x@example.com""#);
        let result = load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidSeedUrl { .. }
        ));
    }
}
