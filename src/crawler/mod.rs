//! Crawler core functionality module
//!
//! Ties the crawl engine together: the [`Coordinator`] drives a FIFO
//! [`Frontier`] of admitted URLs, fetches each one through the shared HTTP
//! client, extracts links from successful HTML responses, and routes every
//! discovered link back through the [`LinkFilter`] before it can re-enter
//! the queue.

pub mod coordinator;
pub mod fetcher;
pub mod filter;
pub mod frontier;
pub mod processor;

pub use coordinator::{run_crawl, Coordinator, CrawlPhase};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use filter::{AdmitDecision, LinkFilter, RejectReason};
pub use frontier::{Frontier, FrontierItem};
pub use processor::{is_html_content_type, process, PageInfo, ProcessError};
