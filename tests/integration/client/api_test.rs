//! Board client request/response handling

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskboard::client::{BoardClient, ClientError};
use taskboard::shared::ConfigError;

#[tokio::test]
async fn test_login_keeps_token_for_later_requests() {
    let server = MockServer::start().await;
    let user = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "id": user,
            "token": "issued-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/current-user"))
        .and(header("authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "user": { "id": user, "name": "Ada", "email": "ada@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = BoardClient::connect(server.uri()).unwrap();
    let auth = client.login("ada@example.com", "hunter22").await.unwrap();

    assert_eq!(auth.id, user);
    assert_eq!(client.token(), Some("issued-token"));
    let me = client.current_user().await.unwrap();
    assert_eq!(me.name, "Ada");
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": false,
            "message": "invalid credential"
        })))
        .mount(&server)
        .await;

    let mut client = BoardClient::connect(server.uri()).unwrap();
    let err = client.login("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "invalid credential");
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_non_envelope_error_uses_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/boards"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = BoardClient::connect(server.uri()).unwrap().with_token("t");
    let err = client.boards().await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 502, ref message } if message.contains("502"));
}

#[tokio::test]
async fn test_success_without_data_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .mount(&server)
        .await;

    let client = BoardClient::connect(server.uri()).unwrap().with_token("t");

    assert_matches!(client.boards().await, Err(ClientError::MissingData(p)) if p == "/boards");
}

#[test]
fn test_connect_validates_url() {
    assert_matches!(
        BoardClient::connect("localhost:5000"),
        Err(ClientError::Config(ConfigError::InvalidUrl(_)))
    );

    let client = BoardClient::connect("http://127.0.0.1:5000/").unwrap();
    assert_eq!(client.config().api_url("/boards"), "http://127.0.0.1:5000/api/v1/boards");
}
