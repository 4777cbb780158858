//! The API client over the real reqwest transport against a local server.

use std::time::Duration;

use futures::StreamExt;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backer::adapters::ReqwestHttpClient;
use backer::api::ApiClient;
use backer::error::{ClientError, NetworkError};
use backer::models::{ActivityCategory, User};
use backer::session::Session;
use backer::transformers::Transform;

fn client(server: &MockServer, session: Session) -> ApiClient<ReqwestHttpClient> {
    let http = ReqwestHttpClient::new(5).unwrap();
    ApiClient::new(http, server.uri(), "integration", session)
}

#[tokio::test]
async fn test_fetch_activities_decodes_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/activities"))
        .and(query_param("page", "1"))
        .and(header("X-Client-Id", "integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "activities": [
                {"id": 1, "category": "success", "created_at": "2016-01-12T10:00:00Z"},
                {"id": 2, "category": "comment-post", "created_at": "2016-01-12T11:00:00Z"}
            ],
            "urls": {"api": {"more_activities": "/v1/activities?page=2"}}
        })))
        .mount(&mock_server)
        .await;

    let results: Vec<_> = client(&mock_server, Session::new()).fetch_activities(1).collect().await;
    assert_eq!(results.len(), 1);

    let envelope = results.into_iter().next().unwrap().unwrap();
    assert_eq!(envelope.activities[0].category, ActivityCategory::Success);
    assert_eq!(envelope.activities[1].category, ActivityCategory::Unknown);
    let more = envelope.urls.and_then(|urls| urls.api.more_activities);
    assert_eq!(more.as_deref(), Some("/v1/activities?page=2"));
}

#[tokio::test]
async fn test_login_error_is_structured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xauth/access_token"))
        .and(body_json(serde_json::json!({"email": "me@example.com", "password": "wrong"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error_messages": ["That email and password don't match."],
            "http_code": 401,
            "ksr_code": "invalid_xauth_login"
        })))
        .mount(&mock_server)
        .await;

    let results: Vec<_> = client(&mock_server, Session::new())
        .login("me@example.com", "wrong")
        .collect()
        .await;

    match &results[..] {
        [Err(ClientError::Api(envelope))] => {
            assert!(envelope.is_invalid_login_error());
            assert!(!envelope.is_tfa_required_error());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_login_error_swallowed_by_never_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xauth/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error_messages": ["Two-factor required"],
            "http_code": 401,
            "ksr_code": "tfa_required"
        })))
        .mount(&mock_server)
        .await;

    let (errors_tx, mut errors_rx) = tokio::sync::mpsc::unbounded_channel();
    let results: Vec<_> = client(&mock_server, Session::new())
        .login("me@example.com", "pw")
        .pipe_api_errors_to(errors_tx)
        .collect()
        .await;

    assert!(results.is_empty());
    assert!(errors_rx.recv().await.unwrap().is_tfa_required_error());
}

#[tokio::test]
async fn test_html_error_page_becomes_generic_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/3/comments"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let results: Vec<_> = client(&mock_server, Session::new()).fetch_comments(3).collect().await;
    match &results[..] {
        [Err(ClientError::Api(envelope))] => assert_eq!(envelope.http_code, 502),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_session_token_is_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/3/comments"))
        .and(header("Authorization", "token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"comments": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = Session::new();
    session.login(
        User {
            id: 5,
            name: "Backer".to_string(),
            avatar: None,
        },
        "abc123",
    );

    let results: Vec<_> = client(&mock_server, session).fetch_comments(3).collect().await;
    assert!(results[0].as_ref().unwrap().comments.is_empty());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let http = ReqwestHttpClient::new(1).unwrap();
    let api = ApiClient::new(http, mock_server.uri(), "integration", Session::new());
    let results: Vec<_> = api.fetch_activities(1).collect().await;

    match &results[..] {
        [Err(ClientError::Network(err))] => {
            assert!(matches!(err, NetworkError::Timeout { .. }));
            assert!(err.is_retryable());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
