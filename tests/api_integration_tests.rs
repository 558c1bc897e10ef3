//! Integration tests for the HTTP client against a mock backend.
//!
//! These exercise the real reqwest plumbing: URL construction, bearer auth,
//! JSON bodies, and the error taxonomy.

use std::time::Duration;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fina::api::{AdvisorApi, ApiClient, ApiError, AuthFailure};
use fina::core::transcript::Role;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5))
}

#[tokio::test]
async fn test_login_success_returns_token_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "pat@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "signed.jwt.token",
            "user": { "email": "pat@example.com" },
        })))
        .mount(&server)
        .await;

    let response = client(&server)
        .login("pat@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(response.token, "signed.jwt.token");
    assert_eq!(response.user.email.as_deref(), Some("pat@example.com"));
}

#[tokio::test]
async fn test_login_unknown_email_maps_to_email_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "EMAIL_NOT_FOUND",
            "message": "no account for that email",
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .login("nobody@example.com", "pw")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthFailure::EmailNotFound)));
}

#[tokio::test]
async fn test_login_wrong_password_maps_to_invalid_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "INVALID_PASSWORD",
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .login("pat@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthFailure::InvalidPassword)));
}

#[tokio::test]
async fn test_login_unrecognized_error_keeps_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "database unavailable",
        })))
        .mount(&server)
        .await;

    let err = client(&server).login("pat@example.com", "pw").await.unwrap_err();
    match err {
        ApiError::Auth(AuthFailure::Other(message)) => {
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Auth(Other), got {other:?}"),
    }
}

#[tokio::test]
async fn test_history_fetch_sends_bearer_and_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "hello, how can I help" },
            ],
        })))
        .mount(&server)
        .await;

    let messages = client(&server).chat_history("test-token").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "hi");
    assert_eq!(messages[1].role, Role::Assistant);
}

#[tokio::test]
async fn test_history_server_error_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "boom",
        })))
        .mount(&server)
        .await;

    let err = client(&server).chat_history("test-token").await.unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_message_returns_reply_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({ "message": "budget tips" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "Track your spending for a month first.",
        })))
        .mount(&server)
        .await;

    let reply = client(&server)
        .send_message("test-token", "budget tips")
        .await
        .unwrap();
    assert_eq!(reply, "Track your spending for a month first.");
}

#[tokio::test]
async fn test_send_message_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .send_message("test-token", "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing is listening on this port.
    let client = ApiClient::new(
        "http://127.0.0.1:1".to_string(),
        Duration::from_millis(500),
    );
    let err = client.send_message("test-token", "hi").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [],
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/", server.uri()), Duration::from_secs(5));
    let messages = client.chat_history("test-token").await.unwrap();
    assert!(messages.is_empty());
}
