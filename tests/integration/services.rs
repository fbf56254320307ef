//! Integration tests for the typed services

use super::*;
use lenses_client::services::connectors::CreateConnectorRequest;
use lenses_client::services::schemas::CompatibilityLevel;
use lenses_client::services::topics::CreateTopicRequest;
use lenses_client::LensesError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::Mock;

#[tokio::test]
async fn test_create_topic() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/topics"))
        .and(body_json(json!({
            "topicName": "orders",
            "replication": 1,
            "partitions": 3,
            "configs": {"retention.ms": "1000"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("Topic 'orders' created"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    client
        .topics()
        .create(CreateTopicRequest::new("orders", 3, 1).config("retention.ms", "1000"))
        .await
        .expect("topic created");
}

#[tokio::test]
async fn test_invalid_topic_sends_nothing() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let result = client
        .topics()
        .create(CreateTopicRequest::new("orders", 0, 1))
        .await;

    assert!(matches!(result, Err(LensesError::Validation { .. })));
}

#[tokio::test]
async fn test_connector_lifecycle() {
    let mock_server = setup_mock_server().await;
    let base = "/api/proxy-connect/dev/connectors";

    Mock::given(method("POST"))
        .and(path(base))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "file-source",
            "config": {"connector.class": "FileStreamSource", "name": "file-source"},
            "tasks": []
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/file-source/pause", base)))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/file-source", base)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let connectors = client.connectors();

    let created = connectors
        .create(
            "dev",
            CreateConnectorRequest::new("file-source").config("connector.class", "FileStreamSource"),
        )
        .await
        .expect("connector created");
    assert_eq!(created.name, "file-source");

    connectors.pause("dev", "file-source").await.expect("paused");
    connectors.delete("dev", "file-source").await.expect("deleted");
}

#[tokio::test]
async fn test_register_schema() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/proxy-sr/subjects/orders-value/versions"))
        .and(header("content-type", "application/vnd.schemaregistry.v1+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let id = client
        .schemas()
        .register("orders-value", r#"{"type":"string"}"#)
        .await
        .expect("registered");

    assert_eq!(id, 7);
}

#[tokio::test]
async fn test_global_compatibility() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/proxy-sr/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"compatibilityLevel": "BACKWARD"})),
        )
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let level = client.schemas().global_compatibility().await.expect("level");

    assert_eq!(level, CompatibilityLevel::Backward);
}

#[tokio::test]
async fn test_alerts_page_size() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"alertId": 1000, "level": "HIGH", "summary": "Broker down", "timestamp": 1}
        ])))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let alerts = client.alerts().list(Some(2)).await.expect("alerts");

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].summary, "Broker down");
}
