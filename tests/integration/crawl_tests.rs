//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock API servers and test
//! the fetch unit and the full crawl cycle end-to-end.

use graph_crawler::config::{parse_config, ApiConfig, Config, CrawlerConfig};
use graph_crawler::crawler::{build_http_client, run_crawl, FailureKind, Fetch, FetchResult, HttpFetcher};
use graph_crawler::endpoint::Endpoint;
use graph_crawler::CrawlerError;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";
const A: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Creates a test configuration against a mock server with a small catalog
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    let toml = format!(
        r#"
[api]
base-url = "{}/v1.0"

[crawler]
request-timeout-secs = 5
connect-timeout-secs = 2

[output]
directory = "{}"

[catalog]
roots = ["/widgets", "/gadgets"]

[catalog.templates]
widget = ["/widgets/{{id}}/parts", "/widgets/{{id}}/owner"]
"#,
        base_url,
        output_dir.display()
    );
    parse_config(&toml).expect("Failed to parse test config")
}

fn fetcher_for(server: &MockServer, token: &str) -> HttpFetcher {
    let client = build_http_client(&ApiConfig::default(), &CrawlerConfig::default())
        .expect("Failed to build client");
    HttpFetcher::new(client, &format!("{}/v1.0", server.uri()), token)
        .expect("Failed to create fetcher")
}

fn endpoint(path: &str) -> Endpoint {
    Endpoint::parse(path).unwrap()
}

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).expect("Saved document is not JSON")
}

fn failure_kind(result: FetchResult) -> FailureKind {
    match result {
        FetchResult::Failure(failure) => failure.kind,
        FetchResult::Success { payload, .. } => panic!("Expected failure, got {}", payload),
    }
}

#[tokio::test]
async fn test_full_crawl_discovers_and_saves() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let config = create_test_config(&mock_server.uri(), &out);

    let widgets = json!({
        "@odata.context": "https://graph.example.com/v1.0/$metadata#widgets",
        "value": [{"id": A, "displayName": "Sprocket", "ownerId": "9b2c1f0e-1a2b-4c3d-8e4f-0123456789ab"}]
    });
    // Re-embeds the parent id, which must not trigger a second fetch
    let parts = json!({"value": [{"id": A}]});

    Mock::given(method("GET"))
        .and(path("/v1.0/widgets"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widgets.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/gadgets"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1.0/widgets/{}/parts", A)))
        .respond_with(ResponseTemplate::new(200).set_body_json(parts.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1.0/widgets/{}/owner", A)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stats = run_crawl(&config, TOKEN, Some("abc123".to_string()))
        .await
        .expect("Crawl failed");

    assert_eq!(stats.round_count(), 2);
    assert_eq!(stats.total_dispatched(), 4);
    assert_eq!(stats.total_succeeded(), 2);
    assert_eq!(stats.total_http_failures(), 1);
    assert_eq!(stats.total_transport_failures(), 1);
    assert_eq!(stats.total_saved(), 2);
    assert_eq!(stats.visited_total(), 4);

    // Root documents are addressed by resource type alone
    assert_eq!(read_json(&out.join("widget").join("widgets.json")), widgets);

    // Child documents are addressed by the id that generated them
    let child = out
        .join("widget")
        .join(A)
        .join(format!("widgets_{}_parts.json", A));
    assert_eq!(read_json(&child), parts);

    // Degraded fetches leave nothing behind
    assert!(!out.join("gadget").exists());
    assert!(!out
        .join("widget")
        .join(A)
        .join(format!("widgets_{}_owner.json", A))
        .exists());

    let summary = read_json(&out.join("crawl-summary.json"));
    assert_eq!(summary["config_hash"], "abc123");
    assert_eq!(summary["endpoints_fetched"], 4);
    assert_eq!(summary["responses_saved"], 2);
    assert_eq!(summary["rounds"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_root_generates_no_children() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), temp_dir.path());

    Mock::given(method("GET"))
        .and(path("/v1.0/widgets"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/gadgets"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stats = run_crawl(&config, TOKEN, None).await.expect("Crawl failed");

    assert_eq!(stats.round_count(), 1);
    assert_eq!(stats.total_http_failures(), 2);
    assert_eq!(stats.total_saved(), 0);
    assert!(!temp_dir.path().join("widget").exists());
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&mock_server)
        .await;

    let accepted = fetcher_for(&mock_server, TOKEN).fetch(&endpoint("/users")).await;
    assert_eq!(accepted.payload(), Some(&json!({"value": []})));

    // Unmatched requests get wiremock's default 404
    let rejected = fetcher_for(&mock_server, "other-token")
        .fetch(&endpoint("/users"))
        .await;
    assert_eq!(failure_kind(rejected), FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn test_non_success_status_is_http_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = fetcher_for(&mock_server, TOKEN).fetch(&endpoint("/users")).await;
    assert_eq!(failure_kind(result), FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn test_any_2xx_with_json_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .respond_with(ResponseTemplate::new(203).set_body_json(json!({"id": A})))
        .mount(&mock_server)
        .await;

    match fetcher_for(&mock_server, TOKEN).fetch(&endpoint("/users")).await {
        FetchResult::Success {
            status_code,
            payload,
        } => {
            assert_eq!(status_code, 203);
            assert_eq!(payload, json!({"id": A}));
        }
        FetchResult::Failure(failure) => panic!("Unexpected failure: {:?}", failure),
    }
}

#[tokio::test]
async fn test_empty_and_malformed_bodies_are_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"value\": ["))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server, TOKEN);
    assert_eq!(
        failure_kind(fetcher.fetch(&endpoint("/empty")).await),
        FailureKind::InvalidBody
    );
    assert_eq!(
        failure_kind(fetcher.fetch(&endpoint("/garbled")).await),
        FailureKind::InvalidBody
    );
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"value": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let crawler_config = CrawlerConfig {
        request_timeout_secs: 1,
        ..CrawlerConfig::default()
    };
    let client = build_http_client(&ApiConfig::default(), &crawler_config).unwrap();
    let fetcher = HttpFetcher::new(client, &format!("{}/v1.0", mock_server.uri()), TOKEN).unwrap();

    let result = fetcher.fetch(&endpoint("/users")).await;
    assert_eq!(failure_kind(result), FailureKind::Timeout);
}

#[tokio::test]
async fn test_connection_refused_is_connect_failure() {
    // Reserve a port, then free it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = build_http_client(&ApiConfig::default(), &CrawlerConfig::default()).unwrap();
    let fetcher = HttpFetcher::new(client, &format!("http://127.0.0.1:{}", port), TOKEN).unwrap();

    let result = fetcher.fetch(&endpoint("/users")).await;
    assert_eq!(failure_kind(result), FailureKind::Connect);
}

#[tokio::test]
async fn test_empty_token_is_rejected_before_crawling() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), temp_dir.path());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = run_crawl(&config, "   ", None).await;
    assert!(matches!(result, Err(CrawlerError::InvalidToken(_))));
}

#[tokio::test]
async fn test_unwritable_output_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    // A regular file where the output directory should be
    let blocked = temp_dir.path().join("blocked");
    std::fs::write(&blocked, "not a directory").unwrap();
    let config = create_test_config(&mock_server.uri(), &blocked);

    Mock::given(method("GET"))
        .and(path("/v1.0/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [{"id": A}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/gadgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1.0/widgets/{}/parts", A)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1.0/widgets/{}/owner", A)))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stats = run_crawl(&config, TOKEN, None).await.expect("Crawl failed");

    assert_eq!(stats.round_count(), 2);
    assert_eq!(stats.total_saved(), 0);
    assert_eq!(stats.total_persistence_failures(), 3);
}
