//! HTTP fetcher
//!
//! One bounded-concurrency fetch is performed per frontier item. The
//! fetcher's only job is to obtain a response and classify the outcome:
//! any HTTP response we receive, including 4xx/5xx, is a valid crawl
//! outcome carrying its status code; only failures below the HTTP
//! semantics layer (DNS, connect, TLS, timeout, body stream) are request
//! errors. Redirects are followed by the client, so the recorded status
//! and body belong to the final hop.

use crate::config::CrawlConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// A response was received (any status code)
    Response {
        status: u16,
        /// Content-Type header value, empty if absent
        content_type: String,
        body: Vec<u8>,
    },

    /// No valid HTTP response was obtained
    RequestError {
        /// Human-readable failure description
        error: String,
    },
}

/// Builds the HTTP client shared by all fetch tasks for one run
///
/// # Arguments
///
/// * `config` - The crawl configuration (timeout, user agent, TLS policy)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    let user_agent = config.user_agent.clone().unwrap_or_else(|| {
        format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    });

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .danger_accept_invalid_certs(!config.verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Never returns an error: every failure mode is folded into a
/// [`FetchOutcome`] so the caller can record it and move on.
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            // A failure while streaming the body is still a transport
            // failure, not a processing error
            match response.bytes().await {
                Ok(body) => FetchOutcome::Response {
                    status,
                    content_type,
                    body: body.to_vec(),
                },
                Err(e) => FetchOutcome::RequestError {
                    error: format!("body read failed: {}", describe_error(&e)),
                },
            }
        }
        Err(e) => FetchOutcome::RequestError {
            error: describe_error(&e),
        },
    }
}

/// Maps a reqwest error to a stable, compact description
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else if e.is_redirect() {
        "too many redirects".to_string()
    } else {
        e.to_string()
    }
}
