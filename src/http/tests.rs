//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::new().unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("api-export/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("limit", "10")
        .header("X-Request-Id", "abc123")
        .json(json!({"key": "value"}))
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query_value("page"), Some("1"));
    assert_eq!(config.query_value("limit"), Some("10"));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_request_config_set_query_replaces() {
    let config = RequestConfig::new()
        .query("cursor", "old")
        .query("tag", "a")
        .query("cursor", "older")
        .set_query("cursor", "0:0:1");

    let cursors: Vec<_> = config.query.iter().filter(|(k, _)| k == "cursor").collect();
    assert_eq!(cursors.len(), 1);
    assert_eq!(config.query_value("cursor"), Some("0:0:1"));
    assert_eq!(config.query_value("tag"), Some("a"));
}

// ============================================================================
// ResponseBody Tests
// ============================================================================

#[test]
fn test_response_body_parse_json() {
    let body = ResponseBody::parse(r#"{"ok": true}"#.to_string());
    assert!(body.is_json());
    assert_eq!(body.into_json().unwrap(), json!({"ok": true}));
}

#[test]
fn test_response_body_parse_text() {
    let body = ResponseBody::parse("<html>hello</html>".to_string());
    assert!(!body.is_json());
    assert_eq!(body.clone().into_value(), json!("<html>hello</html>"));
    assert!(matches!(body.into_json(), Err(Error::Decode { .. })));
}

#[test]
fn test_response_body_empty_is_text() {
    let body = ResponseBody::parse(String::new());
    assert_eq!(body, ResponseBody::Text(String::new()));
}

// ============================================================================
// ApiRequest Tests
// ============================================================================

#[test]
fn test_api_request_rejects_bad_url() {
    assert!(matches!(
        ApiRequest::get("not a url"),
        Err(Error::InvalidUrl(_))
    ));
}

#[test]
fn test_api_request_query_pairs() {
    let request = ApiRequest::get("https://api.example.com/items")
        .unwrap()
        .with_query("q", "rust")
        .with_query("per_page", 25)
        .with_query("active", true)
        .with_query("skip", serde_json::Value::Null)
        .with_query("tag", json!(["a", "b"]));

    assert_eq!(
        request.query_pairs(),
        vec![
            ("q".to_string(), "rust".to_string()),
            ("per_page".to_string(), "25".to_string()),
            ("active".to_string(), "true".to_string()),
            ("tag".to_string(), "a".to_string()),
            ("tag".to_string(), "b".to_string()),
        ]
    );
}

#[test]
fn test_api_request_config_get_has_no_body() {
    let request = ApiRequest::get("https://api.example.com")
        .unwrap()
        .with_header("Authorization", "Bearer t")
        .with_query("a", 1)
        .with_body(json!({"ignored": true}));

    let config = request.request_config(true);
    assert_eq!(config.query_value("a"), Some("1"));
    assert!(config.body.is_none());
    assert_eq!(
        config.headers.get("Authorization"),
        Some(&"Bearer t".to_string())
    );
}

#[test]
fn test_api_request_config_post_defaults_empty_body() {
    let request = ApiRequest::post("https://api.example.com")
        .unwrap()
        .with_query("a", 1);

    let config = request.request_config(false);
    assert!(config.query.is_empty());
    assert_eq!(config.body, Some(json!({})));
}

// ============================================================================
// HttpClient Tests
// ============================================================================

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 1, "name": "Alice"}]
        })))
        .mount(&mock_server)
        .await;

    let response = client()
        .get(&format!("{}/api/users", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let body = response.body.into_json().unwrap();
    assert_eq!(body["users"][0]["name"], "Alice");
}

#[tokio::test]
async fn test_http_client_text_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let response = client()
        .get(&format!("{}/plain", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(response.body, ResponseBody::Text("pong".to_string()));
}

#[tokio::test]
async fn test_http_client_post_with_query_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(query_param("cursor", "0:0:1"))
        .and(body_json(json!({"filter": "open"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 123})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client()
        .post(
            &format!("{}/api/search", mock_server.uri()),
            RequestConfig::new()
                .query("cursor", "0:0:1")
                .json(json!({"filter": "open"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_http_client_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secure"))
        .and(header("X-API-Key", "secret123"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-API-Key", "secret123")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get(
            &format!("{}/api/secure", mock_server.uri()),
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_http_client_status_error_no_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client()
        .get(&format!("{}/api/broken", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_status_error_body_is_shortened() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>".repeat(500)))
        .mount(&mock_server)
        .await;

    let err = client()
        .get(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.chars().count(), 203);
            assert!(body.ends_with("..."));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let err = client()
        .execute(
            Method::GET,
            &format!("{}/api/slow", mock_server.uri()),
            RequestConfig::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_http_client_connection_refused() {
    // Nothing listens on port 9 locally
    let err = client()
        .get("http://127.0.0.1:9/none", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(err.is_transport());
}
