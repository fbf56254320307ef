//! Error categories, validation details and the server error envelope.

use serde::{Deserialize, Serialize};

/// Detailed information about a validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationDetail {
    /// The field that failed validation
    pub field: String,
    /// The error message for this field
    pub message: String,
    /// The invalid value (if available and safe to include)
    pub value: Option<String>,
}

impl ValidationDetail {
    /// Create a new validation detail
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Create a new validation detail with a value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }
}

/// Error category for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Client configuration errors
    Configuration,
    /// Missing or rejected credentials, failed login
    Authentication,
    /// Caller input rejected before sending
    Validation,
    /// Network connectivity issues
    Network,
    /// 5xx responses
    Server,
    /// 404 responses
    NotFound,
    /// Any other non-success response
    Resource,
    /// Unparseable response payloads
    Decode,
    /// Streaming errors
    Streaming,
    /// Internal library errors
    Internal,
}

impl ErrorCategory {
    /// Get a human-readable description of this category
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "Configuration error",
            ErrorCategory::Authentication => "Authentication error",
            ErrorCategory::Validation => "Validation error",
            ErrorCategory::Network => "Network error",
            ErrorCategory::Server => "Server error",
            ErrorCategory::NotFound => "Resource not found",
            ErrorCategory::Resource => "Request rejected",
            ErrorCategory::Decode => "Invalid response payload",
            ErrorCategory::Streaming => "Streaming error",
            ErrorCategory::Internal => "Internal error",
        }
    }
}

/// Error body returned by the Lenses API and the schema registry proxy
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Numeric error code
    #[serde(default)]
    pub error_code: Option<i64>,
    /// Error message
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_detail() {
        let detail = ValidationDetail::new("partitions", "must be positive");
        assert_eq!(detail.field, "partitions");
        assert!(detail.value.is_none());

        let detail = ValidationDetail::with_value("partitions", "must be positive", "0");
        assert_eq!(detail.value, Some("0".to_string()));
    }

    #[test]
    fn test_api_error_response_deserialize() {
        let json = r#"{"error_code": 40401, "message": "Subject not found."}"#;
        let error: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(error.error_code, Some(40401));
        assert_eq!(error.message, "Subject not found.");
    }

    #[test]
    fn test_api_error_response_without_code() {
        let error: ApiErrorResponse = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert!(error.error_code.is_none());
        assert_eq!(error.message, "nope");
    }
}
