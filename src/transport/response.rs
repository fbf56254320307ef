//! Response classification and the validated response type.

use crate::errors::{ApiErrorResponse, LensesError, ResourceError};
use crate::transport::body::ResponseBody;
use crate::transport::http_transport::TransportResponse;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, StatusCode};
use percent_encoding::percent_decode_str;

/// `application/json`
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Schema registry flavour of JSON
pub const CONTENT_TYPE_SCHEMA_JSON: &str = "application/vnd.schemaregistry.v1+json";

/// The success predicate over (status, method).
///
/// 400 counts as success for GET because some query endpoints answer
/// validation failures with a structured body the caller must parse.
pub fn is_success(status: StatusCode, method: &Method) -> bool {
    match status.as_u16() {
        200 | 201 | 202 => true,
        204 => *method == Method::DELETE || *method == Method::POST,
        400 => *method == Method::GET,
        _ => false,
    }
}

/// Parsed `Content-Type` of a response, if present and well formed
pub fn content_type(headers: &HeaderMap) -> Option<mime::Mime> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// True for `application/json` and the schema registry JSON type
pub fn is_json(headers: &HeaderMap) -> bool {
    content_type(headers)
        .map(|m| {
            let essence = m.essence_str();
            essence == CONTENT_TYPE_JSON || essence == CONTENT_TYPE_SCHEMA_JSON
        })
        .unwrap_or(false)
}

/// True for `text/html`
pub fn is_html(headers: &HeaderMap) -> bool {
    content_type(headers)
        .map(|m| m.type_() == mime::TEXT && m.subtype() == mime::HTML)
        .unwrap_or(false)
}

/// Percent-decoded form of a request URI, as reported in errors
pub fn unescape_uri(uri: &str) -> String {
    percent_decode_str(uri).decode_utf8_lossy().into_owned()
}

/// A response that passed the success predicate. Its body is still open.
#[derive(Debug)]
pub struct Response {
    method: Method,
    uri: String,
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl Response {
    pub(crate) fn new(method: Method, uri: String, response: TransportResponse) -> Self {
        let body = ResponseBody::new(&response.headers, response.body);
        Self {
            method,
            uri,
            status: response.status,
            headers: response.headers,
            body,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Method of the request that produced this response
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unescaped URI of the request that produced this response
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Take the body, releasing the response metadata
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    pub(crate) fn into_parts(self) -> (HeaderMap, ResponseBody) {
        (self.headers, self.body)
    }
}

/// Build the error for a response that failed the success predicate.
///
/// Consumes (and so releases) the body. `debug` adds read failures to the
/// message.
pub(crate) async fn resource_error(
    method: Method,
    uri: &str,
    response: TransportResponse,
    debug: bool,
) -> LensesError {
    let status = response.status;
    let json = is_json(&response.headers);
    let body = ResponseBody::new(&response.headers, response.body);

    let message = match body.read_all().await {
        Ok(bytes) => {
            let parsed = if json {
                serde_json::from_slice::<ApiErrorResponse>(&bytes)
                    .ok()
                    .filter(|e| !e.message.is_empty())
                    .map(|e| e.message)
            } else {
                None
            };
            parsed.unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(e) if debug => format!("unable to read the response body: {}", e),
        Err(_) => String::new(),
    };

    LensesError::Resource(ResourceError::new(
        status,
        method,
        unescape_uri(uri),
        message,
    ))
}
