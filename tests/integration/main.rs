//! Integration tests using WireMock
//!
//! These tests run the client against a mock Lenses server and cover the
//! full request/response cycle: login, token header, gzip bodies, error
//! mapping and server-sent event feeds.

mod auth;
mod client;
mod services;
mod streaming;

use flate2::write::GzEncoder;
use flate2::Compression;
use lenses_client::auth::{Authentication, BasicCredentials};
use lenses_client::{ClientConfig, ConnectOption, LensesClient};
use secrecy::SecretString;
use std::io::Write;
use wiremock::{MockServer, ResponseTemplate};

pub const TOKEN: &str = "integration-token";

/// Helper to start a mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Configuration pointing at the mock server with basic credentials
pub fn basic_config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .host(server.uri())
        .authentication(Authentication::Basic(BasicCredentials::new(
            "admin", "secret",
        )))
        .build()
        .expect("valid config")
}

/// A client that skips login and uses [`TOKEN`]
pub async fn token_client(server: &MockServer) -> LensesClient {
    LensesClient::connect(
        basic_config(server),
        vec![ConnectOption::Token(SecretString::new(TOKEN.to_string()))],
    )
    .await
    .expect("client connects")
}

/// Gzip `data`
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

/// A gzip-encoded JSON response
pub fn gzip_json_response(body: &serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-encoding", "gzip")
        .set_body_raw(gzip(body.to_string().as_bytes()), "application/json")
}

/// An event stream response made of `frames`
pub fn event_stream(frames: &[String]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(frames.concat(), "text/event-stream")
}
