//! HTTP transport implementations.

use crate::errors::{LensesError, LensesResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use http::{HeaderMap, Request, StatusCode};
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;

/// A response body as it comes off the wire (possibly gzip-encoded)
pub type ByteStream = Pin<Box<dyn Stream<Item = LensesResult<Bytes>> + Send>>;

/// Response from HTTP transport, body still unread
pub struct TransportResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: ByteStream,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP transport trait for sending one request to the Lenses API.
///
/// Implementations perform exactly one round trip and never retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a fully built request and return the response with its body unread
    async fn send(&self, request: Request<Bytes>) -> LensesResult<TransportResponse>;
}

/// Settings for the reqwest-backed transport
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Overall request timeout
    pub timeout: Duration,
    /// Timeout for establishing the TCP connection
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl TransportSettings {
    /// Settings using one timeout for both dial and request
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            connect_timeout: timeout,
            insecure: false,
        }
    }

    /// Enable or disable TLS certificate verification skipping
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}

/// Reqwest-based HTTP transport implementation
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport.
    ///
    /// HTTP/2 negotiation is disabled and response decompression is left to
    /// the body reader.
    pub fn new(settings: &TransportSettings) -> LensesResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .http1_only()
            .danger_accept_invalid_certs(settings.insecure)
            .build()
            .map_err(|e| LensesError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Create a new reqwest transport with custom client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: Request<Bytes>) -> LensesResult<TransportResponse> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(LensesError::from))
            .boxed();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
