//! Integration tests for `HeaderProxyClient` using wiremock HTTP mocks.

use iplens_cfcheck::{CheckError, HeaderProxyClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HeaderProxyClient {
    HeaderProxyClient::with_proxy_url(5, "iplens-test/0.1", &format!("{}/get", server.uri()))
        .expect("client construction should not fail")
}

#[tokio::test]
async fn check_detects_cloudflare_from_relayed_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("url", "https://example.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": "<html></html>",
            "status": {
                "url": "https://example.com/",
                "http_code": 200,
                "headers": {
                    "CF-RAY": "8a1b2c3d4e5f-SJC",
                    "Server": "cloudflare",
                    "Content-Length": 1256
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .check("Example.com")
        .await
        .expect("check should succeed");

    assert!(result.using_cloudflare);
    assert_eq!(result.ray_id.as_deref(), Some("8a1b2c3d4e5f-SJC"));
    assert_eq!(result.server_header.as_deref(), Some("cloudflare"));
    assert!(result.cache_status.is_none());
}

#[tokio::test]
async fn check_reports_negative_for_plain_origin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "headers": { "server": "nginx" } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.check("plain.example").await.unwrap();

    assert!(!result.using_cloudflare);
    assert!(result.server_header.is_none());
}

#[tokio::test]
async fn missing_headers_is_negative_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": "",
            "status": { "http_code": 200 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.check("example.org").await.unwrap();

    assert!(!result.using_cloudflare);
}

#[tokio::test]
async fn fetch_headers_lowercases_names_and_drops_non_strings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": {
                "headers": {
                    "Cf-Cache-Status": "HIT",
                    "Age": 42
                }
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let target = iplens_cfcheck::format_target_url("example.net").unwrap();
    let headers = client.fetch_headers(&target).await.unwrap();

    assert_eq!(headers.get("cf-cache-status").map(String::as_str), Some("HIT"));
    assert!(!headers.contains_key("age"));
}

#[tokio::test]
async fn proxy_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.check("down.example").await.unwrap_err();

    assert!(
        matches!(err, CheckError::UnexpectedStatus { status: 502 }),
        "expected UnexpectedStatus(502), got: {err:?}"
    );
    assert_eq!(
        err.user_message(),
        "Failed to check domain. Make sure it is accessible."
    );
}

#[tokio::test]
async fn non_json_proxy_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.check("example.com").await.unwrap_err();

    assert!(matches!(err, CheckError::Deserialize { .. }));
}

#[tokio::test]
async fn empty_domain_never_reaches_proxy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.check("  ").await.unwrap_err();

    assert!(matches!(err, CheckError::EmptyDomain));
}
