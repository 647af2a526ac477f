//! Page processing: title and link extraction
//!
//! Runs only on successful (2xx) HTML responses. Extracts the first
//! `<title>` element's trimmed text and the raw `href` values of all
//! anchors. Links are neither resolved nor filtered here; that is the
//! admission filter's job. Any failure to interpret the body becomes a
//! [`ProcessError`] which the coordinator records per-URL and moves past.

use scraper::{Html, Selector};
use thiserror::Error;

/// Information extracted from one HTML page
#[derive(Debug, Clone, Default)]
pub struct PageInfo {
    /// First `<title>` text, trimmed; None when absent or empty
    pub title: Option<String>,

    /// Raw href values of anchor elements, in document order
    pub links: Vec<String>,
}

/// Failure while interpreting an otherwise successful response body
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("selector error: {0}")]
    Selector(String),
}

/// Extracts the title and outgoing links from an HTML body
///
/// # Arguments
///
/// * `body` - The raw response body bytes
///
/// # Returns
///
/// * `Ok(PageInfo)` - Extracted title and links
/// * `Err(ProcessError)` - The body could not be interpreted as HTML text
pub fn process(body: &[u8]) -> Result<PageInfo, ProcessError> {
    let text = std::str::from_utf8(body)?;
    let document = Html::parse_document(text);

    let title = extract_title(&document)?;
    let links = extract_links(&document)?;

    Ok(PageInfo { title, links })
}

fn extract_title(document: &Html) -> Result<Option<String>, ProcessError> {
    let selector =
        Selector::parse("title").map_err(|e| ProcessError::Selector(e.to_string()))?;

    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn extract_links(document: &Html) -> Result<Vec<String>, ProcessError> {
    let selector =
        Selector::parse("a[href]").map_err(|e| ProcessError::Selector(e.to_string()))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect())
}

/// Returns true when the Content-Type header indicates an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_lowercase().contains("text/html")
}
