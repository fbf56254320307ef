//! Integration tests for the server-sent event feeds

use super::*;
use lenses_client::services::alerts::Alert;
use lenses_client::services::logs::LogLine;
use lenses_client::LensesError;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::Mock;

fn alert_frame(id: u32) -> String {
    format!(
        "data:0{}\n",
        json!({"alertId": id, "level": "LOW", "summary": "lag", "timestamp": 0})
    )
}

#[tokio::test]
async fn test_alert_stream_delivers_every_event() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/sse/alerts"))
        .respond_with(event_stream(&[alert_frame(1), alert_frame(2), alert_frame(3)]))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let mut ids = Vec::new();
    client
        .alerts()
        .stream(&mut |alert: Alert| {
            ids.push(alert.alert_id);
            Ok(())
        })
        .await
        .expect("stream ends cleanly");

    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_alert_stream_drops_unterminated_tail() {
    let mock_server = setup_mock_server().await;
    let partial = alert_frame(2).trim_end().to_string();

    Mock::given(method("GET"))
        .and(path("/api/sse/alerts"))
        .respond_with(event_stream(&[alert_frame(1), partial]))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let mut ids = Vec::new();
    client
        .alerts()
        .stream(&mut |alert: Alert| {
            ids.push(alert.alert_id);
            Ok(())
        })
        .await
        .expect("stream ends cleanly");

    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_gzip_event_stream() {
    let mock_server = setup_mock_server().await;
    let body = [alert_frame(7), alert_frame(8)].concat();

    Mock::given(method("GET"))
        .and(path("/api/sse/alerts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_raw(gzip(body.as_bytes()), "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let mut ids = Vec::new();
    client
        .alerts()
        .stream(&mut |alert: Alert| {
            ids.push(alert.alert_id);
            Ok(())
        })
        .await
        .expect("stream ends cleanly");

    assert_eq!(ids, vec![7, 8]);
}

#[tokio::test]
async fn test_audit_stream_rejects_unframed_line() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/sse/audit"))
        .respond_with(event_stream(&[": keep-alive\n".to_string()]))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let result = client.audits().stream(&mut |_| Ok(())).await;

    assert!(matches!(result, Err(LensesError::StreamProtocol { .. })));
}

#[tokio::test]
async fn test_log_tail_skips_unframed_lines() {
    let mock_server = setup_mock_server().await;
    let frame = format!(
        "data:0{}\n",
        json!({"timestamp": 5, "level": "INFO", "message": "started"})
    );

    Mock::given(method("GET"))
        .and(path("/api/sse/logs"))
        .respond_with(event_stream(&[": heartbeat\n".to_string(), frame]))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let mut messages = Vec::new();
    client
        .logs()
        .tail(&mut |line: LogLine| {
            messages.push(line.message);
            Ok(())
        })
        .await
        .expect("tail ends cleanly");

    assert_eq!(messages, vec!["started".to_string()]);
}

#[tokio::test]
async fn test_stream_error_status() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/sse/alerts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server).await;
    let result = client.alerts().stream(&mut |_| Ok(())).await;

    assert_eq!(result.unwrap_err().status_code(), Some(503));
}
