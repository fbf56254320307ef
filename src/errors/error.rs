//! Error types for the Lenses API client.

use crate::errors::categories::{ErrorCategory, ValidationDetail};
use http::{Method, StatusCode};
use std::fmt;
use thiserror::Error;

/// Result type alias for Lenses operations
pub type LensesResult<T> = Result<T, LensesError>;

/// An HTTP call that did not satisfy the success predicate.
///
/// This is the only structured error surfaced for HTTP failures other than
/// authorization problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceError {
    status: StatusCode,
    method: Method,
    uri: String,
    message: String,
}

impl ResourceError {
    /// Create a new resource error
    pub fn new(
        status: StatusCode,
        method: Method,
        uri: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            method,
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// HTTP status code returned by the server
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// HTTP method of the failed call
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unescaped target URI of the failed call
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Best-effort human readable message extracted from the response body
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed with status {}",
            self.method,
            self.uri,
            self.status.as_u16()
        )?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResourceError {}

/// Main error type for the Lenses API client.
#[derive(Error, Debug)]
pub enum LensesError {
    /// Configuration error (invalid settings, missing required fields)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Caller input rejected before any network call was made
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue
        message: String,
        /// List of specific validation failures
        details: Vec<ValidationDetail>,
    },

    /// The server answered 401. Never carries response body detail.
    #[error("credentials missing or invalid")]
    CredentialsMissing,

    /// Login did not produce a session token
    #[error("Authentication error: {message}")]
    Authentication {
        /// Error message describing the authentication issue
        message: String,
    },

    /// Non-success response for any status other than 401
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The request could not be sent or the connection failed
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON in a response the caller expected to parse
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// A gzip-encoded body could not be decompressed
    #[error("failed to decompress response body: {0}")]
    Decompression(#[source] std::io::Error),

    /// A streamed line did not carry the expected frame prefix
    #[error("unexpected server-sent event line: {line}")]
    StreamProtocol {
        /// The offending line, lossily decoded
        line: String,
    },

    /// An HTML page came back where an API payload was expected (debug mode only)
    #[error("unknown error while reading the response")]
    UnknownResponse,

    /// The response body stream failed mid-read
    #[error("Stream error: {message}")]
    Stream {
        /// Error message describing the stream issue
        message: String,
    },

    /// Local I/O failure (reading context files)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LensesError {
    /// Shorthand for a validation error without field details
    pub fn validation(message: impl Into<String>) -> Self {
        LensesError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Shorthand for a validation error on a single required field
    pub fn required(field: &str) -> Self {
        LensesError::Validation {
            message: format!("{} is required", field),
            details: vec![ValidationDetail::new(field, "must not be empty")],
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            LensesError::Configuration { .. } => ErrorCategory::Configuration,
            LensesError::Validation { .. } => ErrorCategory::Validation,
            LensesError::CredentialsMissing | LensesError::Authentication { .. } => {
                ErrorCategory::Authentication
            }
            LensesError::Resource(err) if err.status() == StatusCode::NOT_FOUND => {
                ErrorCategory::NotFound
            }
            LensesError::Resource(err) if err.status().is_server_error() => ErrorCategory::Server,
            LensesError::Resource(_) => ErrorCategory::Resource,
            LensesError::Transport(_) => ErrorCategory::Network,
            LensesError::Decode(_) | LensesError::Decompression(_) | LensesError::UnknownResponse => {
                ErrorCategory::Decode
            }
            LensesError::StreamProtocol { .. } | LensesError::Stream { .. } => {
                ErrorCategory::Streaming
            }
            LensesError::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Returns true if a caller-side retry may succeed.
    ///
    /// Nothing inside this crate's transport retries; this is a hint for
    /// callers applying their own policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            LensesError::Transport(err) => err.is_timeout() || err.is_connect(),
            LensesError::Resource(err) => matches!(
                err.status().as_u16(),
                409 | 429 | 500 | 502 | 503 | 504
            ),
            _ => false,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LensesError::CredentialsMissing => Some(401),
            LensesError::Resource(err) => Some(err.status().as_u16()),
            LensesError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The resource error, if this is one
    pub fn as_resource(&self) -> Option<&ResourceError> {
        match self {
            LensesError::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<url::ParseError> for LensesError {
    fn from(err: url::ParseError) -> Self {
        LensesError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

impl From<http::Error> for LensesError {
    fn from(err: http::Error) -> Self {
        LensesError::Configuration {
            message: format!("Invalid request: {}", err),
        }
    }
}
