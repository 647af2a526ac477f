//! Crawl coordinator - main crawl orchestration logic
//!
//! The coordinator owns the main loop: it pulls items from the frontier,
//! dispatches fetch+process tasks bounded by the concurrency limit, feeds
//! discovered links back through the admission filter, and terminates when
//! the frontier is drained. It is the only component with a lifecycle
//! beyond a single crawl step, moving through Idle, Running, Draining and
//! Done.

use crate::config::{validate, CrawlConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::filter::{AdmitDecision, LinkFilter};
use crate::crawler::frontier::{Frontier, FrontierItem};
use crate::crawler::processor::{is_html_content_type, process};
use crate::report::{Aggregator, CrawlReport, CrawlResult};
use crate::url::normalize_absolute;
use crate::{KumoError, Result};
use chrono::Utc;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Lifecycle phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Created but not started
    Idle,
    /// Items are queued or being dispatched
    Running,
    /// The queue is empty; waiting on in-flight tasks whose completion may
    /// re-populate it
    Draining,
    /// The frontier is drained and the report is finalized
    Done,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<CrawlConfig>,
    client: Client,
    filter: Arc<LinkFilter>,
    semaphore: Arc<Semaphore>,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a new coordinator for the given configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration; validated here
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(KumoError)` - Invalid configuration or client build failure
    pub fn new(config: CrawlConfig) -> Result<Self> {
        validate(&config)?;

        let client = build_http_client(&config)?;
        let config = Arc::new(config);
        let filter = Arc::new(LinkFilter::new(Arc::clone(&config)));
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency));

        Ok(Self {
            config,
            client,
            filter,
            semaphore,
            phase: CrawlPhase::Idle,
        })
    }

    /// Returns the current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion and returns the final report
    ///
    /// The loop dispatches every queued item as a task onto a join set,
    /// then waits for one completion at a time. Each completion may hand
    /// back newly admitted links, so the drain condition (queue empty AND
    /// nothing in flight) is re-checked after every completion. Per-URL
    /// failures are recorded and never abort the run; only a failure of
    /// the task machinery itself propagates.
    pub async fn run(&mut self) -> Result<CrawlReport> {
        let seed = normalize_absolute(&self.config.seed_url).map_err(KumoError::Url)?;

        tracing::info!(
            "Starting crawl: seed={}, max_depth={}, concurrency={}",
            seed,
            self.config.max_depth,
            self.config.max_concurrency
        );

        let aggregator = Arc::new(Mutex::new(Aggregator::new()));
        aggregator.lock().unwrap().start();

        let mut frontier = Frontier::new();
        match self.filter.admit_seed(&seed) {
            AdmitDecision::Accept(item) => frontier.enqueue(item),
            // Unreachable for a fresh filter, but harmless
            AdmitDecision::Reject(reason) => {
                tracing::warn!("Seed {} not admitted: {}", seed, reason);
            }
        }
        self.phase = CrawlPhase::Running;

        let mut tasks: JoinSet<Vec<FrontierItem>> = JoinSet::new();
        let mut completed: u64 = 0;

        loop {
            while let Some(item) = frontier.dequeue() {
                frontier.task_started();
                tasks.spawn(process_item(
                    item,
                    self.client.clone(),
                    Arc::clone(&self.filter),
                    Arc::clone(&aggregator),
                    Arc::clone(&self.semaphore),
                ));
            }

            if frontier.in_flight() > 0 {
                self.phase = CrawlPhase::Draining;
            }

            match tasks.join_next().await {
                Some(Ok(admitted)) => {
                    frontier.task_finished();
                    completed += 1;

                    if !admitted.is_empty() {
                        self.phase = CrawlPhase::Running;
                        for item in admitted {
                            frontier.enqueue(item);
                        }
                    }

                    if completed % 10 == 0 {
                        tracing::info!(
                            "Progress: {} pages processed, {} queued, {} in flight",
                            completed,
                            frontier.len(),
                            frontier.in_flight()
                        );
                    }
                }
                Some(Err(e)) => {
                    // A panicked or cancelled task means the core cannot
                    // account for its work; treat as fatal
                    frontier.task_finished();
                    return Err(KumoError::TaskJoin(e.to_string()));
                }
                None => {
                    debug_assert!(frontier.is_drained());
                    break;
                }
            }
        }

        self.phase = CrawlPhase::Done;
        tracing::info!(
            "Crawl complete: {} pages processed, {} URLs admitted",
            completed,
            self.filter.visited_count()
        );

        let aggregator = Arc::try_unwrap(aggregator)
            .map_err(|_| KumoError::TaskJoin("aggregator still shared after drain".to_string()))?
            .into_inner()
            .unwrap();
        let (results, stats) = aggregator.finalize();

        Ok(CrawlReport::new(&self.config, results, stats))
    }
}

/// Fetches and processes a single frontier item
///
/// Produces exactly one crawl result regardless of outcome, records it
/// with the aggregator, and returns the links that passed admission so the
/// coordinator can enqueue them. Acquiring the semaphore permit is the
/// task's concurrency gate; it is held for the duration of the fetch.
async fn process_item(
    item: FrontierItem,
    client: Client,
    filter: Arc<LinkFilter>,
    aggregator: Arc<Mutex<Aggregator>>,
    semaphore: Arc<Semaphore>,
) -> Vec<FrontierItem> {
    let outcome = {
        let _permit = match semaphore.acquire_owned().await {
            Ok(permit) => permit,
            // The semaphore lives as long as the coordinator; closure here
            // means the run is being torn down
            Err(_) => return Vec::new(),
        };

        tracing::info!("Fetching: {} (depth {})", item.url, item.depth);
        fetch_url(&client, item.url.as_str()).await
    };

    let mut result = CrawlResult {
        url: item.url.to_string(),
        depth: item.depth,
        status_code: None,
        content_size: None,
        title: None,
        error: None,
        timestamp: Utc::now(),
    };
    let mut admitted = Vec::new();

    match outcome {
        FetchOutcome::Response {
            status,
            content_type,
            body,
        } => {
            result.status_code = Some(status);
            result.content_size = Some(body.len() as u64);

            let is_success = (200..300).contains(&status);
            if is_success && is_html_content_type(&content_type) {
                match process(&body) {
                    Ok(page) => {
                        result.title = page.title;

                        for raw in &page.links {
                            match filter.admit(raw, &item.url, item.depth) {
                                AdmitDecision::Accept(next) => admitted.push(next),
                                AdmitDecision::Reject(reason) => {
                                    tracing::debug!(
                                        "Filtered link '{}' on {}: {}",
                                        raw,
                                        item.url,
                                        reason
                                    );
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Processing error for {}: {}", item.url, e);
                        result.error = Some(format!("processing error: {}", e));
                    }
                }
            } else {
                tracing::debug!(
                    "Skipping link extraction for {} (status {}, content-type '{}')",
                    item.url,
                    status,
                    content_type
                );
            }
        }

        FetchOutcome::RequestError { error } => {
            tracing::warn!("Request error fetching {}: {}", item.url, error);
            result.error = Some(format!("request error: {}", error));
        }
    }

    result.timestamp = Utc::now();
    aggregator.lock().unwrap().record(result);

    admitted
}

/// Runs a complete crawl with the given configuration
///
/// Convenience wrapper that constructs a [`Coordinator`] and runs it to
/// completion.
///
/// # Example
///
/// ```no_run
/// use kumo::config::CrawlConfig;
/// use kumo::crawler::run_crawl;
///
/// # async fn example() -> kumo::Result<()> {
/// let config = CrawlConfig::new("https://example.com/");
/// let report = run_crawl(config).await?;
/// println!("Processed {} URLs", report.stats.total_urls_processed);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
