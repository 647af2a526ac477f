//! Kumo main entry point
//!
//! This is the command-line interface for the Kumo web crawler.

use anyhow::Context;
use clap::Parser;
use kumo::config::{load_config, parse_blacklist_input, validate, CrawlConfig};
use kumo::crawler::run_crawl;
use kumo::report::{print_summary, write_json_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumo: a bounded-depth concurrent web crawler
///
/// Kumo crawls outward from a seed URL, following links breadth-first up
/// to a maximum depth while bounding concurrent requests. It prints a run
/// summary and can optionally write the full report as JSON.
#[derive(Parser, Debug)]
#[command(name = "kumo")]
#[command(version)]
#[command(about = "A bounded-depth concurrent web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL", required_unless_present = "config")]
    seed: Option<String>,

    /// Path to TOML configuration file (CLI flags override its values)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth to follow from the seed
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<u32>,

    /// Comma-separated list of domains the crawl may not leave
    #[arg(long, value_name = "DOMAINS")]
    domains: Option<String>,

    /// Extension blacklist: a file path (one extension per line) or a
    /// comma-separated list
    #[arg(long, value_name = "FILE_OR_LIST")]
    blacklist: Option<String>,

    /// Maximum number of concurrent requests
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "STRING")]
    user_agent: Option<String>,

    /// Write the full crawl report to this file as JSON
    #[arg(short, long, value_name = "FILE")]
    output_json: Option<PathBuf>,

    /// Disable TLS certificate verification
    #[arg(long)]
    no_verify_tls: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    tracing::info!(
        "Crawling {} (depth {}, concurrency {})",
        config.seed_url,
        config.max_depth,
        config.max_concurrency
    );

    let report = run_crawl(config).await.context("crawl failed")?;

    if !cli.quiet {
        print_summary(&report);
    }

    if let Some(path) = &cli.output_json {
        write_json_report(&report, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Builds the effective configuration from the config file (if any) with
/// CLI flags layered on top
fn build_config(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => {
            // Clap guarantees the seed is present when no config file is given
            let seed = cli.seed.as_deref().unwrap_or_default();
            CrawlConfig::new(seed)
        }
    };

    if let Some(seed) = &cli.seed {
        config.seed_url = seed.clone();
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(domains) = &cli.domains {
        config.allowed_domains = domains
            .split(',')
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
    }
    if let Some(blacklist) = &cli.blacklist {
        config.blacklisted_extensions =
            parse_blacklist_input(blacklist).context("invalid --blacklist value")?;
    }
    if let Some(concurrency) = cli.concurrency {
        config.max_concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(user_agent) = &cli.user_agent {
        config.user_agent = Some(user_agent.clone());
    }
    if cli.no_verify_tls {
        config.verify_tls = false;
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo=info,warn"),
            1 => EnvFilter::new("kumo=debug,info"),
            2 => EnvFilter::new("kumo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
