//! Paged collection over real HTTP

use booster_crack::config::ApiConfig;
use booster_crack::{collect_all, CrackError, HttpFetcher};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(base_url: &str) -> HttpFetcher {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        user_agent: "BoosterCrackTest/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 1,
    };
    HttpFetcher::new(&config).expect("Failed to build fetcher")
}

async fn mount_page(server: &MockServer, page_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_collects_three_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/list/1",
        json!({"object": "list", "has_more": true, "next_page": format!("{}/list/2", base_url), "data": [1, 2]}),
    )
    .await;
    mount_page(
        &mock_server,
        "/list/2",
        json!({"object": "list", "has_more": true, "next_page": format!("{}/list/3", base_url), "data": [3]}),
    )
    .await;
    mount_page(
        &mock_server,
        "/list/3",
        json!({"object": "list", "has_more": false, "next_page": null, "data": [4, 5]}),
    )
    .await;

    let fetcher = fetcher_for(&base_url);
    let items: Vec<u32> = collect_all(&format!("{}/list/1", base_url), &fetcher)
        .await
        .expect("Collection failed");

    assert_eq!(items, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_sends_json_accept_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"has_more": false, "data": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server.uri());
    let items: Vec<Value> = collect_all(&format!("{}/list", mock_server.uri()), &fetcher)
        .await
        .expect("Collection failed");

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_error_status_on_second_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/list/1",
        json!({"has_more": true, "next_page": format!("{}/list/2", base_url), "data": [1]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/list/2"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "object": "error",
            "code": "unavailable",
            "status": 503,
            "details": "Try again later"
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&base_url);
    let result: Result<Vec<u32>, _> = collect_all(&format!("{}/list/1", base_url), &fetcher).await;

    match result {
        Err(CrackError::UpstreamStatus {
            status,
            status_text,
            locator,
            details,
        }) => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
            assert_eq!(locator, format!("{}/list/2", base_url));
            assert_eq!(details["details"], "Try again later");
        }
        other => panic!("Expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_with_html_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server.uri());
    let result: Result<Vec<u32>, _> =
        collect_all(&format!("{}/list", mock_server.uri()), &fetcher).await;

    match result {
        Err(CrackError::UpstreamStatus { status, details, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(details, json!({}));
        }
        other => panic!("Expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_page_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": [1, 2"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server.uri());
    let result: Result<Vec<u32>, _> =
        collect_all(&format!("{}/list", mock_server.uri()), &fetcher).await;

    assert!(matches!(result, Err(CrackError::MalformedPage { .. })));
}

#[tokio::test]
async fn test_has_more_without_next_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/list",
        json!({"has_more": true, "next_page": null, "data": [1]}),
    )
    .await;

    let fetcher = fetcher_for(&mock_server.uri());
    let result: Result<Vec<u32>, _> =
        collect_all(&format!("{}/list", mock_server.uri()), &fetcher).await;

    assert!(matches!(result, Err(CrackError::MalformedPage { .. })));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let fetcher = fetcher_for(&base_url);
    let result: Result<Vec<u32>, _> = collect_all(&format!("{}/list", base_url), &fetcher).await;

    match result {
        Err(CrackError::Transport { locator, .. }) => {
            assert_eq!(locator, format!("{}/list", base_url));
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}
