//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use kumo::config::CrawlConfig;
use kumo::crawler::Coordinator;
use kumo::CrawlReport;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the mock server
fn create_test_config(seed: &str, max_depth: u32) -> CrawlConfig {
    let mut config = CrawlConfig::new(seed);
    config.max_depth = max_depth;
    config.max_concurrency = 5;
    config.timeout_secs = 5;
    config
}

/// Mounts a 200 text/html page at the given path
async fn mount_html(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

async fn run_crawl(config: CrawlConfig) -> CrawlReport {
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await.expect("Crawl failed")
}

fn result_for<'a>(report: &'a CrawlReport, url_suffix: &str) -> &'a kumo::CrawlResult {
    report
        .results
        .iter()
        .find(|r| r.url.ends_with(url_suffix))
        .unwrap_or_else(|| panic!("no result for URL ending in '{}'", url_suffix))
}

#[tokio::test]
async fn test_full_crawl_follows_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="/photo.jpg">A photo</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/page1",
        "<html><head><title>Page 1</title></head><body>Content 1</body></html>".to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/page2",
        "<html><head><title>Page 2</title></head><body>Content 2</body></html>".to_string(),
    )
    .await;

    // The default extension blacklist must keep this from ever being fetched
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 2);
    let report = run_crawl(config).await;

    assert_eq!(report.stats.total_urls_processed, 3);
    assert_eq!(report.stats.total_errors_request, 0);
    assert_eq!(report.stats.total_errors_processing, 0);
    assert_eq!(report.results.len(), 3);

    let home = result_for(&report, "/");
    assert_eq!(home.status_code, Some(200));
    assert_eq!(home.depth, 0);
    assert_eq!(home.title.as_deref(), Some("Home"));

    let page1 = result_for(&report, "/page1");
    assert_eq!(page1.depth, 1);
    assert_eq!(page1.title.as_deref(), Some("Page 1"));
    assert!(page1.error.is_none());
}

#[tokio::test]
async fn test_allowed_domains_confines_the_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = url::Url::parse(&base_url)
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/local">Local</a>
        <a href="http://elsewhere.invalid/external">External</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_html(&mock_server, "/local", "<html><body>ok</body></html>".to_string()).await;

    let mut config = create_test_config(&format!("{}/", base_url), 2);
    config.allowed_domains.insert(host);
    let report = run_crawl(config).await;

    // The external link is filtered at admission: it produces no result and
    // no request error
    assert_eq!(report.stats.total_urls_processed, 2);
    assert_eq!(report.stats.total_errors_request, 0);
    assert!(report
        .results
        .iter()
        .all(|r| !r.url.contains("elsewhere.invalid")));
}

#[tokio::test]
async fn test_http_error_status_is_a_valid_outcome() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/missing">Gone</a></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 1);
    let report = run_crawl(config).await;

    let missing = result_for(&report, "/missing");
    assert_eq!(missing.status_code, Some(404));
    assert!(missing.error.is_none(), "an HTTP 404 is not an error");

    assert_eq!(report.stats.total_errors_request, 0);
    assert_eq!(report.stats.total_errors_processing, 0);
    assert_eq!(report.stats.status_code_counts.get(&404), Some(&1));
    assert_eq!(report.stats.status_code_counts.get(&200), Some(&1));
}

#[tokio::test]
async fn test_timeout_is_a_request_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&format!("{}/", base_url), 1);
    config.timeout_secs = 1;
    let report = run_crawl(config).await;

    assert_eq!(report.stats.total_urls_processed, 1);
    assert_eq!(report.stats.total_errors_request, 1);
    assert!(report.stats.status_code_counts.is_empty());

    let seed = &report.results[0];
    assert!(seed.status_code.is_none());
    assert!(seed.error.is_some());
}

#[tokio::test]
async fn test_shared_link_is_fetched_exactly_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/left">L</a>
        <a href="/right">R</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    // Both branches point at the same target; fragments must not defeat
    // deduplication
    mount_html(
        &mock_server,
        "/left",
        r#"<html><body><a href="/shared">S</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/right",
        r#"<html><body><a href="/shared#section">S</a></body></html>"#.to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>shared</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 2);
    let report = run_crawl(config).await;

    assert_eq!(report.stats.total_urls_processed, 4);
    let shared_results = report
        .results
        .iter()
        .filter(|r| r.url.ends_with("/shared"))
        .count();
    assert_eq!(shared_results, 1);
}

#[tokio::test]
async fn test_depth_limit_stops_expansion() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/depth1">next</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/depth1",
        r#"<html><body><a href="/depth2">next</a></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/depth2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 1);
    let report = run_crawl(config).await;

    assert_eq!(report.stats.total_urls_processed, 2);
    assert!(report.results.iter().all(|r| r.depth <= 1));
    assert!(!report.results.iter().any(|r| r.url.ends_with("/depth2")));
}

#[tokio::test]
async fn test_non_html_response_is_recorded_but_not_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let json_body = r#"{"links": ["<a href=\"/never\">x</a>"]}"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(json_body, "application/json"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 2);
    let report = run_crawl(config).await;

    assert_eq!(report.stats.total_urls_processed, 1);
    let seed = &report.results[0];
    assert_eq!(seed.status_code, Some(200));
    assert_eq!(seed.content_size, Some(json_body.len() as u64));
    assert!(seed.title.is_none());
    assert!(seed.error.is_none());
}

#[tokio::test]
async fn test_stats_counters_are_consistent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Mixed</title></head><body>
        <a href="/ok">ok</a>
        <a href="/broken">broken</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_html(&mock_server, "/ok", "<html><body>fine</body></html>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 1);
    let report = run_crawl(config).await;

    let stats = &report.stats;
    assert_eq!(stats.total_urls_processed, report.results.len() as u64);

    // Every result either carries a status code or counts as a request error
    let with_status: u64 = stats.status_code_counts.values().sum();
    assert_eq!(
        with_status + stats.total_errors_request,
        stats.total_urls_processed
    );

    assert_eq!(stats.status_code_counts.get(&200), Some(&2));
    assert_eq!(stats.status_code_counts.get(&500), Some(&1));
    assert!(stats.duration_seconds.is_some());
    assert!(stats.end_time.is_some());
}
