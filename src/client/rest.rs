//! The request/response core every service is built on.

use crate::errors::{LensesError, LensesResult};
use crate::observability::ClientLogger;
use crate::transport::{
    apply_all, is_html, is_success, read_events, resource_error, FrameMode, HttpTransport,
    RequestOption, Response, CONTENT_TYPE_JSON,
};
use crate::TOKEN_HEADER;
use bytes::Bytes;
use http::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Sends requests to one Lenses server and interprets the responses.
pub struct RestClient {
    host: String,
    transport: Arc<dyn HttpTransport>,
    token: RwLock<Option<SecretString>>,
    modifier: Option<Arc<dyn RequestOption>>,
    logger: ClientLogger,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("host", &self.host)
            .field("has_token", &self.has_token())
            .field("has_modifier", &self.modifier.is_some())
            .field("logger", &self.logger)
            .finish()
    }
}

impl RestClient {
    /// Create a client for `host` (scheme, host and optional port)
    pub fn new(host: &str, transport: Arc<dyn HttpTransport>) -> LensesResult<Self> {
        let url = url::Url::parse(host)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(LensesError::Configuration {
                message: format!("unsupported scheme {:?} in host {}", url.scheme(), host),
            });
        }

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            transport,
            token: RwLock::new(None),
            modifier: None,
            logger: ClientLogger::default(),
        })
    }

    /// Use `logger` for this client's output
    pub fn with_logger(mut self, logger: ClientLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Apply `modifier` to every request, before the per-call options
    pub fn with_request_modifier(mut self, modifier: Arc<dyn RequestOption>) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Start with a session token
    pub fn with_token(self, token: SecretString) -> Self {
        self.set_token(token);
        self
    }

    /// Replace the session token
    pub fn set_token(&self, token: SecretString) {
        *self.token.write() = Some(token);
    }

    /// Forget the session token
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Whether a non-empty session token is set
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .as_ref()
            .map(|t| !t.expose_secret().is_empty())
            .unwrap_or(false)
    }

    /// Configured server URL, without trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host name part of the server URL
    pub fn host_name(&self) -> LensesResult<String> {
        let url = url::Url::parse(&self.host)?;
        url.host_str()
            .map(str::to_string)
            .ok_or_else(|| LensesError::Configuration {
                message: format!("host {} has no host name", self.host),
            })
    }

    /// This client's logger
    pub fn logger(&self) -> &ClientLogger {
        &self.logger
    }

    /// Absolute URL for an API path; a single leading slash is ignored
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.host, path)
    }

    /// Send one request and classify the response.
    ///
    /// On success the body is left unread. A 401 yields
    /// [`LensesError::CredentialsMissing`]; any other failing status yields
    /// [`LensesError::Resource`]. Transport errors are returned as they are.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: Option<Bytes>,
        options: &[&dyn RequestOption],
    ) -> LensesResult<Response> {
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(self.endpoint(path));

        let token = self.token.read().clone();
        if let Some(token) = token.as_ref().filter(|t| !t.expose_secret().is_empty()) {
            builder = builder.header(TOKEN_HEADER, token.expose_secret().as_str());
        }
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder = builder.header(ACCEPT_ENCODING, "gzip");

        let mut request = builder.body(body.unwrap_or_default())?;

        if let Some(modifier) = &self.modifier {
            modifier.apply(&mut request)?;
        }
        apply_all(&mut request, options.iter().copied())?;

        let uri = request.uri().to_string();
        if self.logger.is_debug() {
            let attributes: HashMap<String, String> = request
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or("<binary>").to_string(),
                    )
                })
                .collect();
            self.logger.log_request(method.as_str(), &uri, attributes);
        }

        let started = Instant::now();
        let response = self.transport.send(request).await.map_err(|e| {
            self.logger
                .log_error(&format!("{} {}", method, uri), &e.to_string());
            e
        })?;
        self.logger.log_response(
            method.as_str(),
            &uri,
            response.status.as_u16(),
            started.elapsed().as_millis() as u64,
        );

        if response.status == StatusCode::UNAUTHORIZED {
            drop(response);
            return Err(LensesError::CredentialsMissing);
        }

        if !is_success(response.status, &method) {
            let mut attributes = HashMap::new();
            attributes.insert("method".to_string(), method.to_string());
            attributes.insert("uri".to_string(), uri.clone());
            attributes.insert("status".to_string(), response.status.as_u16().to_string());
            self.logger.log_warning("Request rejected", attributes);
            return Err(resource_error(method, &uri, response, self.logger.is_debug()).await);
        }

        Ok(Response::new(method, uri, response))
    }

    /// Read a successful response to the end.
    ///
    /// In debug mode an HTML body yields [`LensesError::UnknownResponse`].
    pub async fn read_body(&self, response: Response) -> LensesResult<Bytes> {
        let (headers, body) = response.into_parts();
        let bytes = body.read_all().await?;

        if self.logger.is_debug() && is_html(&headers) {
            return Err(LensesError::UnknownResponse);
        }

        Ok(bytes)
    }

    /// Read a successful response and decode it as JSON
    pub async fn read_json<T: DeserializeOwned>(&self, response: Response) -> LensesResult<T> {
        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            if e.is_syntax() && self.logger.is_debug() {
                let mut attributes = HashMap::new();
                attributes.insert("line".to_string(), e.line().to_string());
                attributes.insert("column".to_string(), e.column().to_string());
                attributes.insert(
                    "offset".to_string(),
                    byte_offset(&bytes, e.line(), e.column()).to_string(),
                );
                self.logger
                    .log_debug("Malformed JSON in response body", attributes);
            }
            LensesError::Decode(e)
        })
    }

    /// Open a live endpoint and feed every decoded event to `handler`.
    ///
    /// Returns when the server closes the stream, or with the first read,
    /// protocol, decode or handler error.
    pub async fn stream<E, F>(
        &self,
        path: &str,
        mode: FrameMode,
        options: &[&dyn RequestOption],
        handler: F,
    ) -> LensesResult<()>
    where
        E: DeserializeOwned,
        F: FnMut(E) -> LensesResult<()>,
    {
        let response = self.execute(Method::GET, path, None, None, options).await?;
        read_events(response.into_body(), mode, handler).await
    }

    /// GET and decode JSON
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> LensesResult<T> {
        self.get_json_with(path, &[]).await
    }

    /// GET with request options and decode JSON
    pub async fn get_json_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &[&dyn RequestOption],
    ) -> LensesResult<T> {
        let response = self.execute(Method::GET, path, None, None, options).await?;
        self.read_json(response).await
    }

    /// Send a JSON body and decode the JSON answer
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> LensesResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let payload = Bytes::from(serde_json::to_vec(body)?);
        let response = self
            .execute(method, path, Some(CONTENT_TYPE_JSON), Some(payload), &[])
            .await?;
        self.read_json(response).await
    }

    /// Send an optional JSON body, ignoring whatever the server answers
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> LensesResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let (content_type, payload) = match body {
            Some(body) => (
                Some(CONTENT_TYPE_JSON),
                Some(Bytes::from(serde_json::to_vec(body)?)),
            ),
            None => (None, None),
        };
        let response = self
            .execute(method, path, content_type, payload, &[])
            .await?;
        self.read_body(response).await?;
        Ok(())
    }

    /// DELETE, ignoring the answer
    pub async fn delete(&self, path: &str) -> LensesResult<()> {
        self.delete_with(path, &[]).await
    }

    /// DELETE with request options, ignoring the answer
    pub async fn delete_with(
        &self,
        path: &str,
        options: &[&dyn RequestOption],
    ) -> LensesResult<()> {
        let response = self
            .execute(Method::DELETE, path, None, None, options)
            .await?;
        self.read_body(response).await?;
        Ok(())
    }
}

/// Byte offset of a 1-based (line, column) position
fn byte_offset(data: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = data
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    preceding + column.saturating_sub(1)
}
