//! Mock implementations for testing.
//!
//! A scripted [`HttpTransport`] plus byte-stream helpers that count how
//! often a body is released.

use crate::errors::{LensesError, LensesResult};
use crate::transport::{ByteStream, HttpTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use futures::stream::{self, Stream};
use http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::Write;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Gzip-compress `data`
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Counts how many times the wrapped stream was dropped
#[derive(Debug, Clone, Default)]
pub struct CloseCounter(Arc<AtomicUsize>);

impl CloseCounter {
    /// Number of drops observed so far
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A body stream that records its own release
pub struct CountingStream {
    inner: ByteStream,
    closes: CloseCounter,
}

impl CountingStream {
    fn wrap(inner: ByteStream) -> (ByteStream, CloseCounter) {
        let closes = CloseCounter::default();
        let stream = Self {
            inner,
            closes: closes.clone(),
        };
        (Box::pin(stream), closes)
    }

    /// A stream yielding `chunks` then ending cleanly
    pub fn chunks(chunks: Vec<Vec<u8>>) -> (ByteStream, CloseCounter) {
        let items: Vec<LensesResult<Bytes>> = chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect();
        Self::wrap(Box::pin(stream::iter(items)))
    }

    /// A stream yielding `chunks` then a read error
    pub fn failing(chunks: Vec<Vec<u8>>) -> (ByteStream, CloseCounter) {
        let mut items: Vec<LensesResult<Bytes>> = chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect();
        items.push(Err(LensesError::Stream {
            message: "connection reset by peer".to_string(),
        }));
        Self::wrap(Box::pin(stream::iter(items)))
    }
}

impl Stream for CountingStream {
    type Item = LensesResult<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for CountingStream {
    fn drop(&mut self) {
        self.closes.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A scripted response
#[derive(Clone)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body chunks, delivered in order
    pub chunks: Vec<Vec<u8>>,
    /// Fail with a read error after the chunks
    pub fail_read: bool,
}

impl MockResponse {
    /// Response with an explicit content type
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        Self {
            status,
            headers,
            chunks: vec![body.into()],
            fail_read: false,
        }
    }

    /// JSON response
    pub fn json<T: serde::Serialize>(status: u16, data: &T) -> Self {
        Self::new(status, "application/json", serde_json::to_vec(data).unwrap())
    }

    /// Plain text response
    pub fn text(status: u16, body: &str) -> Self {
        Self::new(status, "text/plain", body)
    }

    /// Response without a body
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            chunks: Vec::new(),
            fail_read: false,
        }
    }

    /// Lenses-style JSON error
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, &serde_json::json!({"error_code": status, "message": message}))
    }

    /// Event stream delivering `chunks` as they are given
    pub fn stream(chunks: Vec<&str>) -> Self {
        let mut response = Self::new(200, "text/event-stream", Vec::new());
        response.chunks = chunks.into_iter().map(|c| c.as_bytes().to_vec()).collect();
        response
    }

    /// Gzip the body and mark it with `Content-Encoding`
    pub fn gzipped(mut self) -> Self {
        let body: Vec<u8> = self.chunks.concat();
        self.chunks = vec![gzip(&body)];
        self.headers
            .insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        self
    }

    /// End the body with a read error
    pub fn failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }
}

/// A recorded request
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// HTTP method
    pub method: Method,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Vec<u8>,
}

/// Mock HTTP transport replaying queued responses
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<MockRequest>>,
    closes: Mutex<Vec<CloseCounter>>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            closes: Mutex::new(Vec::new()),
        }
    }

    /// Add a response to return
    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Get recorded requests
    pub fn get_requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Get the last request
    pub fn last_request(&self) -> Option<MockRequest> {
        self.requests.lock().last().cloned()
    }

    /// Release counts of every body handed out, in request order
    pub fn body_closes(&self) -> Vec<usize> {
        self.closes.lock().iter().map(CloseCounter::count).collect()
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: Request<Bytes>) -> LensesResult<TransportResponse> {
        let (parts, body) = request.into_parts();
        self.requests.lock().push(MockRequest {
            method: parts.method,
            url: parts.uri.to_string(),
            headers: parts.headers,
            body: body.to_vec(),
        });

        let response = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| MockResponse::text(500, "No mock response configured"));

        let (body, closes) = if response.fail_read {
            CountingStream::failing(response.chunks)
        } else {
            CountingStream::chunks(response.chunks)
        };
        self.closes.lock().push(closes);

        Ok(TransportResponse {
            status: StatusCode::from_u16(response.status).unwrap(),
            headers: response.headers,
            body,
        })
    }
}
