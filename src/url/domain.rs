use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion of the URL, or None for URLs without
/// a host (which normalized HTTP(S) URLs always have).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use kumo::url::extract_domain;
///
/// let url = Url::parse("https://Sub.Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the file extension from a URL's path
///
/// The extension is the text after the last `.` in the last path segment,
/// returned lowercase with a leading dot so it compares directly against
/// blacklist entries. A segment that is only a dot-prefixed name (such as
/// `/.hidden`) or has no dot yields None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use kumo::url::extract_extension;
///
/// let url = Url::parse("https://example.com/photos/cat.JPG").unwrap();
/// assert_eq!(extract_extension(&url), Some(".jpg".to_string()));
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(extract_extension(&url), None);
/// ```
pub fn extract_extension(url: &Url) -> Option<String> {
    let last_segment = url.path().rsplit('/').next()?;

    let (stem, ext) = last_segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }

    Some(format!(".{}", ext.to_lowercase()))
}
