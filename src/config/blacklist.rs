//! Blacklist input handling
//!
//! The `--blacklist` argument accepts either a comma-separated list of
//! extensions or a path to a file containing such a list. Extensions are
//! normalized to lowercase with a leading dot so they compare directly
//! against what the URL module extracts.

use crate::ConfigError;
use std::collections::HashSet;
use std::path::Path;

/// Normalizes a single blacklist extension entry
///
/// Trims whitespace, lowercases, and prepends a dot when missing.
/// Returns None for entries that are empty after trimming.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if lowered.starts_with('.') {
        Some(lowered)
    } else {
        Some(format!(".{}", lowered))
    }
}

/// Parses the blacklist argument into a set of normalized extensions
///
/// If `input` names an existing file, its content is read and treated as a
/// comma-separated list; otherwise `input` itself is split on commas. An
/// input that yields no valid entries produces an empty set, which disables
/// the extension rule entirely (it does not fall back to the defaults).
///
/// # Arguments
///
/// * `input` - The raw `--blacklist` argument value
///
/// # Returns
///
/// * `Ok(HashSet<String>)` - The normalized extension set
/// * `Err(ConfigError)` - The input named a file that could not be read
pub fn parse_blacklist_input(input: &str) -> Result<HashSet<String>, ConfigError> {
    let path = Path::new(input);

    let raw_list = if path.is_file() {
        tracing::info!("Reading blacklist extensions from file: {}", input);
        std::fs::read_to_string(path).map_err(|e| ConfigError::BlacklistFile {
            path: input.to_string(),
            source: e,
        })?
    } else {
        if input.contains(std::path::MAIN_SEPARATOR) {
            tracing::warn!(
                "Blacklist argument '{}' looks like a path but no such file exists; \
                 treating it as a comma-separated list",
                input
            );
        }
        input.to_string()
    };

    let extensions: HashSet<String> = raw_list
        .split(',')
        .filter_map(normalize_extension)
        .collect();

    if extensions.is_empty() {
        tracing::info!("Blacklist input provided but contained no extensions");
    } else {
        tracing::debug!("Parsed {} blacklist extensions", extensions.len());
    }

    Ok(extensions)
}
