//! Link admission filtering
//!
//! Every link discovered during the crawl passes through an ordered list of
//! named predicate stages before it may enter the frontier. The first
//! failing stage determines the rejection reason, which keeps filtering
//! decisions diagnosable in debug logs. Rejected links are silently
//! dropped; they are not errors and produce no crawl result.

use crate::config::CrawlConfig;
use crate::crawler::FrontierItem;
use crate::url::{extract_domain, extract_extension, resolve_and_normalize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use url::Url;

/// Why a discovered link was not admitted to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The href did not resolve to a crawlable absolute HTTP(S) URL
    Malformed,
    /// The link would exceed the configured maximum depth
    MaxDepthExceeded,
    /// The host is not in the configured allow-list
    DomainNotAllowed,
    /// The path extension is blacklisted
    BlacklistedExtension,
    /// The normalized URL was already admitted once
    AlreadyVisited,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::MaxDepthExceeded => "max-depth-exceeded",
            Self::DomainNotAllowed => "domain-not-allowed",
            Self::BlacklistedExtension => "blacklisted-extension",
            Self::AlreadyVisited => "already-visited",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmitDecision {
    /// The link may be enqueued with the given normalized URL and depth
    Accept(FrontierItem),
    Reject(RejectReason),
}

/// Decides which discovered links enter the frontier
///
/// Owns the visited set. The insert-and-check in the final stage is a
/// single operation under the lock, so two concurrent fetches discovering
/// the same URL cannot both admit it.
pub struct LinkFilter {
    config: Arc<CrawlConfig>,
    visited: Mutex<HashSet<String>>,
}

impl LinkFilter {
    pub fn new(config: Arc<CrawlConfig>) -> Self {
        Self {
            config,
            visited: Mutex::new(HashSet::new()),
        }
    }

    /// Runs a discovered link through the admission stages, in order:
    ///
    /// 1. Resolve against the source page and normalize (`malformed`)
    /// 2. Depth bound: `source_depth + 1 <= max_depth` (`max-depth-exceeded`)
    /// 3. Domain allow-list, exact host match (`domain-not-allowed`)
    /// 4. Extension blacklist (`blacklisted-extension`)
    /// 5. Atomic visited insert-check (`already-visited`)
    ///
    /// # Arguments
    ///
    /// * `raw_link` - The href value as extracted from the page
    /// * `base` - The URL of the page the link was found on
    /// * `source_depth` - The depth of that page
    pub fn admit(&self, raw_link: &str, base: &Url, source_depth: u32) -> AdmitDecision {
        let url = match resolve_and_normalize(base, raw_link) {
            Ok(url) => url,
            Err(_) => return AdmitDecision::Reject(RejectReason::Malformed),
        };

        let depth = source_depth + 1;
        if depth > self.config.max_depth {
            return AdmitDecision::Reject(RejectReason::MaxDepthExceeded);
        }

        if !self.config.allowed_domains.is_empty() {
            let allowed = extract_domain(&url)
                .map(|d| self.config.allowed_domains.contains(&d))
                .unwrap_or(false);
            if !allowed {
                return AdmitDecision::Reject(RejectReason::DomainNotAllowed);
            }
        }

        if let Some(ext) = extract_extension(&url) {
            if self.config.blacklisted_extensions.contains(&ext) {
                return AdmitDecision::Reject(RejectReason::BlacklistedExtension);
            }
        }

        self.try_mark_visited(url, depth)
    }

    /// Admits the seed URL, which the user supplied explicitly
    ///
    /// The domain and extension stages are skipped for the seed; the depth
    /// check holds trivially at depth 0 and the visited insert still
    /// applies.
    pub fn admit_seed(&self, seed: &Url) -> AdmitDecision {
        self.try_mark_visited(seed.clone(), 0)
    }

    /// Number of distinct URLs admitted so far
    pub fn visited_count(&self) -> usize {
        self.visited.lock().unwrap().len()
    }

    fn try_mark_visited(&self, url: Url, depth: u32) -> AdmitDecision {
        let mut visited = self.visited.lock().unwrap();
        if visited.insert(url.as_str().to_string()) {
            AdmitDecision::Accept(FrontierItem { url, depth })
        } else {
            AdmitDecision::Reject(RejectReason::AlreadyVisited)
        }
    }
}
