//! Report generation for completed crawls
//!
//! This module owns the per-URL results and run statistics while the crawl
//! is in flight (the [`Aggregator`]) and assembles them into the final
//! [`CrawlReport`] that can be printed as a summary or written out as JSON.

mod aggregator;

pub use aggregator::{Aggregator, CrawlResult, CrawlStats};

use crate::config::CrawlConfig;
use serde::Serialize;
use std::path::Path;

/// The final report for one crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub max_depth: u32,
    /// None when the crawl was not domain-restricted
    pub allowed_domains: Option<Vec<String>>,
    pub blacklist_extensions: Vec<String>,
    pub results: Vec<CrawlResult>,
    pub stats: CrawlStats,
}

impl CrawlReport {
    /// Assembles a report from the run configuration and the finalized
    /// aggregator output
    pub fn new(config: &CrawlConfig, results: Vec<CrawlResult>, stats: CrawlStats) -> Self {
        let allowed_domains = if config.allowed_domains.is_empty() {
            None
        } else {
            let mut domains: Vec<String> = config.allowed_domains.iter().cloned().collect();
            domains.sort();
            Some(domains)
        };

        let mut blacklist_extensions: Vec<String> =
            config.blacklisted_extensions.iter().cloned().collect();
        blacklist_extensions.sort();

        Self {
            start_url: config.seed_url.clone(),
            max_depth: config.max_depth,
            allowed_domains,
            blacklist_extensions,
            results,
            stats,
        }
    }
}

/// Writes the report as pretty-printed JSON to the given path
pub fn write_json_report(report: &CrawlReport, path: &Path) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), report)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}

/// Prints a human-readable run summary to stdout
pub fn print_summary(report: &CrawlReport) {
    println!("\n{} Crawl Summary {}", "=".repeat(30), "=".repeat(30));
    println!("Start URL:         {}", report.start_url);
    println!("Max Depth:         {}", report.max_depth);
    if let Some(domains) = &report.allowed_domains {
        println!("Allowed Domains:   {}", domains.join(", "));
    }
    if let Some(duration) = report.stats.duration_seconds {
        println!("Duration:          {:.2} seconds", duration);
    }
    println!("URLs Processed:    {}", report.stats.total_urls_processed);
    println!("Request Errors:    {}", report.stats.total_errors_request);
    println!("Processing Errors: {}", report.stats.total_errors_processing);

    println!("\nStatus Code Counts:");
    if report.stats.status_code_counts.is_empty() {
        println!("  None");
    } else {
        let mut codes: Vec<_> = report.stats.status_code_counts.iter().collect();
        codes.sort_by_key(|(code, _)| **code);
        for (code, count) in codes {
            println!("  {}: {}", code, count);
        }
    }

    println!("\nDomain Counts (Top 10):");
    if report.stats.domain_counts.is_empty() {
        println!("  None");
    } else {
        let mut domains: Vec<_> = report.stats.domain_counts.iter().collect();
        domains.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (domain, count) in domains.iter().take(10) {
            println!("  {}: {}", domain, count);
        }
        if domains.len() > 10 {
            println!("  ...");
        }
    }
    println!("{}", "=".repeat(75));
}
