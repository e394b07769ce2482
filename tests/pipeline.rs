//! Request pipeline tests against a local mock API.

mod common;

use atomgit_mcp::client::ApiRequest;
use atomgit_mcp::error::{ApiError, AtomGitError};
use chrono::{TimeZone, Utc};
use common::{unreachable_client, MockApi, Reply};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};

#[tokio::test]
async fn test_default_headers_with_token() {
    let api = MockApi::start(Reply::json(200, json!({}))).await;
    let client = api.client(Some("secret-token"));

    client
        .execute(ApiRequest::get(client.endpoint(&["user"]).unwrap()))
        .await
        .unwrap();

    let req = api.only_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.uri, "/user");
    assert_eq!(req.header("accept"), Some("application/json"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("authorization"), Some("Bearer secret-token"));
    let ua = req.header("user-agent").unwrap();
    assert!(ua.starts_with(&format!(
        "modelcontextprotocol/servers/atomgit/v{} ",
        env!("CARGO_PKG_VERSION")
    )));
}

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let api = MockApi::start(Reply::json(200, json!({}))).await;
    let client = api.client(None);

    client
        .execute(ApiRequest::get(client.endpoint(&["user"]).unwrap()))
        .await
        .unwrap();

    assert!(api.only_request().header("authorization").is_none());
}

#[tokio::test]
async fn test_caller_headers_override_defaults_but_not_token() {
    let api = MockApi::start(Reply::json(200, json!({}))).await;
    let client = api.client(Some("secret-token"));

    let request = ApiRequest::get(client.endpoint(&["user"]).unwrap())
        .header(ACCEPT, HeaderValue::from_static("application/vnd.atomgit+json"))
        .header(AUTHORIZATION, HeaderValue::from_static("token other"));
    client.execute(request).await.unwrap();

    let req = api.only_request();
    assert_eq!(req.header("accept"), Some("application/vnd.atomgit+json"));
    assert_eq!(req.header("authorization"), Some("Bearer secret-token"));
}

#[tokio::test]
async fn test_json_body_is_serialized() {
    let api = MockApi::start(Reply::json(201, json!({"number": 7}))).await;
    let client = api.client(None);

    let url = client.endpoint(&["repos", "alice", "proj", "issues"]).unwrap();
    let result = client
        .execute(ApiRequest::post(url).json(json!({"title": "Crash", "body": "details"})))
        .await
        .unwrap();

    assert_eq!(result, json!({"number": 7}));
    let req = api.only_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.json(), json!({"title": "Crash", "body": "details"}));
}

#[tokio::test]
async fn test_absent_body_sends_no_payload() {
    let api = MockApi::start(Reply::json(200, json!([]))).await;
    let client = api.client(None);

    let url = client.endpoint(&["repos", "alice", "proj", "labels", "bug"]).unwrap();
    client.execute(ApiRequest::delete(url)).await.unwrap();

    let req = api.only_request();
    assert_eq!(req.method, Method::DELETE);
    assert!(req.body.is_empty());
}

#[tokio::test]
async fn test_non_json_response_returned_as_text() {
    let api = MockApi::start(Reply::raw(200, Some("text/plain"), "pong")).await;
    let client = api.client(None);

    let result = client
        .execute(ApiRequest::get(client.endpoint(&["ping"]).unwrap()))
        .await
        .unwrap();
    assert_eq!(result, Value::String("pong".into()));
}

#[tokio::test]
async fn test_json_looking_text_is_not_sniffed() {
    let api = MockApi::start(Reply::raw(200, Some("text/html"), r#"{"a":1}"#)).await;
    let client = api.client(None);

    let result = client
        .execute(ApiRequest::get(client.endpoint(&["ping"]).unwrap()))
        .await
        .unwrap();
    assert_eq!(result, Value::String(r#"{"a":1}"#.into()));
}

#[tokio::test]
async fn test_empty_json_body_decodes_to_null() {
    let api = MockApi::start(Reply::raw(200, Some("application/json"), "")).await;
    let client = api.client(None);

    let result = client
        .execute(ApiRequest::delete(client.endpoint(&["x"]).unwrap()))
        .await
        .unwrap();
    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn test_malformed_json_on_success_is_decode_error() {
    let api = MockApi::start(Reply::raw(200, Some("application/json"), "{not json")).await;
    let client = api.client(None);

    let err = client
        .execute(ApiRequest::get(client.endpoint(&["x"]).unwrap()))
        .await
        .unwrap_err();
    assert!(matches!(err, AtomGitError::Decode(_)));
}

#[tokio::test]
async fn test_error_payload_reaches_classifier() {
    let payload = json!({"message": "title is blank", "errors": [{"field": "title"}]});
    let api = MockApi::start(Reply::json(422, payload.clone())).await;
    let client = api.client(None);

    let err = client
        .execute(ApiRequest::post(client.endpoint(&["x"]).unwrap()).json(json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_api_error(),
        Some(&ApiError::Validation {
            message: "title is blank".into(),
            body: payload,
        })
    );
}

#[tokio::test]
async fn test_text_error_classified_generic() {
    let api = MockApi::start(Reply::raw(502, Some("text/html"), "<h1>Bad Gateway</h1>")).await;
    let client = api.client(None);

    let err = client
        .execute(ApiRequest::get(client.endpoint(&["x"]).unwrap()))
        .await
        .unwrap_err();
    match err.as_api_error() {
        Some(ApiError::Generic {
            status,
            message,
            body,
        }) => {
            assert_eq!(*status, 502);
            assert_eq!(message, "AtomGit API error");
            assert_eq!(body, &json!("<h1>Bad Gateway</h1>"));
        }
        other => panic!("expected generic error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_on_error_still_classified() {
    let api = MockApi::start(Reply::raw(404, Some("application/json"), "{oops")).await;
    let client = api.client(None);

    let err = client
        .execute(ApiRequest::get(client.endpoint(&["x"]).unwrap()))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_api_error(),
        Some(&ApiError::NotFound {
            resource: "Resource".into()
        })
    );
}

#[tokio::test]
async fn test_rate_limit_reset_from_response() {
    let api = MockApi::start(Reply::json(
        429,
        json!({"message": "slow down", "reset_at": "2030-01-01T00:00:00Z"}),
    ))
    .await;
    let client = api.client(None);

    let err = client
        .execute(ApiRequest::get(client.endpoint(&["x"]).unwrap()))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_api_error(),
        Some(&ApiError::RateLimit {
            message: "slow down".into(),
            reset_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        })
    );
}

#[tokio::test]
async fn test_connection_failure_is_unclassified() {
    let client = unreachable_client().await;

    let err = client
        .execute(ApiRequest::get(client.endpoint(&["user"]).unwrap()))
        .await
        .unwrap_err();
    assert!(matches!(err, AtomGitError::Transport(_)));
    assert!(err.as_api_error().is_none());
}
