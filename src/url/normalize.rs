use crate::UrlError;
use url::Url;

/// Resolves a raw link against the page it was found on and normalizes it
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace and resolve against `base`; reject if the
///    result is not a parseable URL
/// 2. Reject schemes other than HTTP and HTTPS (this also drops `mailto:`,
///    `javascript:`, `tel:` and `data:` links)
/// 3. Lowercase the host (the scheme is already lowercased by the parser)
/// 4. Strip the fragment
///
/// The returned URL string is the canonical key used for the visited set
/// and for domain counting.
///
/// # Arguments
///
/// * `base` - The URL of the page the link was discovered on
/// * `raw` - The raw href value
///
/// # Returns
///
/// * `Ok(Url)` - The absolute, normalized URL
/// * `Err(UrlError)` - The link could not be resolved to a crawlable URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use kumo::url::resolve_and_normalize;
///
/// let base = Url::parse("https://example.com/a/b").unwrap();
/// let url = resolve_and_normalize(&base, "../c#frag").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/c");
/// ```
pub fn resolve_and_normalize(base: &Url, raw: &str) -> Result<Url, UrlError> {
    let resolved = base
        .join(raw.trim())
        .map_err(|e| UrlError::Parse(e.to_string()))?;

    normalize(resolved)
}

/// Parses and normalizes a standalone absolute URL (used for the seed)
///
/// Applies the same scheme/host/fragment rules as [`resolve_and_normalize`]
/// but without a base URL to resolve against.
pub fn normalize_absolute(raw: &str) -> Result<Url, UrlError> {
    let parsed = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    normalize(parsed)
}

fn normalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    // The url crate lowercases registered domain names on parse, but not
    // every host representation; make the canonical form explicit.
    match url.host_str() {
        Some(host) => {
            let lowered = host.to_lowercase();
            if lowered != host {
                url.set_host(Some(&lowered))
                    .map_err(|e| UrlError::Parse(e.to_string()))?;
            }
        }
        None => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);

    Ok(url)
}
