//! Result aggregation and run statistics
//!
//! The aggregator is the single owner of per-URL results and the run
//! counters. Fetch tasks record into it through a shared lock as they
//! complete, so the result list reflects completion order, not discovery
//! order; all counters are order-independent sums.

use crate::url::extract_domain;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use url::Url;

/// Information gathered for a single crawled URL
///
/// Exactly one result is produced per dequeued frontier item, regardless of
/// outcome. A transport failure leaves `status_code` unset and fills
/// `error`; a valid HTTP response of any status fills `status_code` and
/// leaves `error` unset unless the body could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub url: String,
    pub depth: u32,
    pub status_code: Option<u16>,
    pub content_size: Option<u64>,
    pub title: Option<String>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Overall statistics for a single crawl
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlStats {
    pub total_urls_processed: u64,
    pub total_errors_request: u64,
    pub total_errors_processing: u64,
    pub status_code_counts: HashMap<u16, u64>,
    pub domain_counts: HashMap<String, u64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
}

/// Accumulates crawl results and statistics as tasks complete
///
/// Wrapped in a mutex and shared across fetch tasks; every mutation goes
/// through [`record`](Aggregator::record), the single mutation point.
#[derive(Debug)]
pub struct Aggregator {
    results: Vec<CrawlResult>,
    stats: CrawlStats,
    started: Option<Instant>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            stats: CrawlStats::default(),
            started: None,
        }
    }

    /// Marks the beginning of the run
    pub fn start(&mut self) {
        self.stats.start_time = Some(Utc::now());
        self.started = Some(Instant::now());
    }

    /// Records the outcome of one dequeued frontier item
    ///
    /// Updates `total_urls_processed` unconditionally, the status-code and
    /// domain counters where applicable, and exactly one error counter when
    /// the result carries an error. The error kind is derived from the
    /// result's shape: no status code means the request itself failed,
    /// a status code alongside an error means processing failed.
    pub fn record(&mut self, result: CrawlResult) {
        self.stats.total_urls_processed += 1;

        if let Some(status) = result.status_code {
            *self.stats.status_code_counts.entry(status).or_insert(0) += 1;
        }

        if let Ok(url) = Url::parse(&result.url) {
            if let Some(domain) = extract_domain(&url) {
                *self.stats.domain_counts.entry(domain).or_insert(0) += 1;
            }
        }

        if result.error.is_some() {
            if result.status_code.is_none() {
                self.stats.total_errors_request += 1;
            } else {
                self.stats.total_errors_processing += 1;
            }
        }

        self.results.push(result);
    }

    /// Number of results recorded so far
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Closes the run and returns the accumulated results and statistics
    ///
    /// Callable only once the coordinator has confirmed the frontier is
    /// drained; after this point no further records arrive.
    pub fn finalize(mut self) -> (Vec<CrawlResult>, CrawlStats) {
        self.stats.end_time = Some(Utc::now());
        if let Some(started) = self.started {
            let secs = started.elapsed().as_secs_f64();
            self.stats.duration_seconds = Some((secs * 100.0).round() / 100.0);
        }
        (self.results, self.stats)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
