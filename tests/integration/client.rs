//! Integration tests for connecting, login and error mapping

use super::*;
use lenses_client::{LensesError, TOKEN_HEADER};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::Mock;

#[tokio::test]
async fn test_basic_login_sets_session_token() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"user": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("session-42\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth"))
        .and(header(TOKEN_HEADER, "session-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": "admin",
            "permissions": ["ManageTopics"]
        })))
        .mount(&mock_server)
        .await;

    let client = LensesClient::connect(basic_config(&mock_server), vec![])
        .await
        .expect("login succeeds");
    let profile = client.user_profile().await.expect("profile");

    assert_eq!(profile.user, "admin");
    assert!(profile.has_permission("ManageTopics"));
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&mock_server)
        .await;

    let result = LensesClient::connect(basic_config(&mock_server), vec![]).await;

    assert!(matches!(result, Err(LensesError::CredentialsMissing)));
}

#[tokio::test]
async fn test_login_empty_token() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  "))
        .mount(&mock_server)
        .await;

    let result = LensesClient::connect(basic_config(&mock_server), vec![]).await;

    assert!(matches!(result, Err(LensesError::Authentication { .. })));
}

#[tokio::test]
async fn test_requests_ask_for_gzip() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(header("accept-encoding", "gzip"))
        .and(header(TOKEN_HEADER, TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let topics = client.topics().list().await.expect("topics");

    assert!(topics.is_empty());
}

#[tokio::test]
async fn test_gzip_body_is_decoded() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/topics/orders"))
        .respond_with(gzip_json_response(&json!({
            "topicName": "orders",
            "partitions": 6,
            "replication": 3
        })))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let topic = client.topics().get("orders").await.expect("topic");

    assert_eq!(topic.topic_name, "orders");
    assert_eq!(topic.partitions, 6);
}

#[tokio::test]
async fn test_unauthorized_call_maps_to_credentials_missing() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let result = client.topics().list().await;

    assert!(matches!(result, Err(LensesError::CredentialsMissing)));
}

#[tokio::test]
async fn test_not_found_json_message() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/topics/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error_code": 404,
            "message": "Topic missing does not exist"
        })))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let error = client.topics().get("missing").await.unwrap_err();

    let resource = error.as_resource().expect("resource error");
    assert_eq!(resource.status().as_u16(), 404);
    assert_eq!(resource.message(), "Topic missing does not exist");
    assert!(resource.uri().ends_with("/api/topics/missing"));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_server_error_text_message() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path("/api/topics/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("broker unavailable"))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let error = client.topics().delete("orders").await.unwrap_err();

    assert_eq!(error.status_code(), Some(500));
    assert_eq!(error.as_resource().unwrap().message(), "broker unavailable");
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_request_modifier_applies_to_every_call() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(header_exists("x-trace"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let modifier = lenses_client::HeaderOption::new("x-trace", "abc").unwrap();
    let client = LensesClient::connect(
        basic_config(&mock_server),
        vec![
            ConnectOption::Token(SecretString::new(TOKEN.to_string())),
            ConnectOption::RequestModifier(std::sync::Arc::new(modifier)),
        ],
    )
    .await
    .unwrap();

    client.topics().list().await.expect("topics");
}

#[tokio::test]
async fn test_logout_clears_token() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    client.logout().await.expect("logout");

    assert!(!client.rest().has_token());
}
