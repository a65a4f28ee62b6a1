//! Structured errors for the recipe API transport.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of API errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Transport failure (connect, DNS, broken pipe)
    Network,
    /// Non-2xx HTTP response (includes 401/403 auth failures)
    HttpStatus,
    /// Connection timeout or request timeout
    Timeout,
    /// Payload missing expected fields or not valid JSON
    Malformed,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Malformed => write!(f, "malformed"),
        }
    }
}

/// Structured error from the API with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// HTTP status code, when the server answered at all
    pub status: Option<u16>,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, extracting a cleaner message from a
    /// JSON error body when one is present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let mut message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(msg) = extract_error_message(&json)
            {
                message = format!("HTTP {status}: {msg}");
            }
            Some(body.to_string())
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            status: Some(status),
            message,
            details,
        }
    }

    /// Creates a network transport error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Malformed, message)
    }

    /// Returns true for authentication/authorization failures (401/403).
    pub fn is_auth(&self) -> bool {
        matches!(self.status, Some(401 | 403))
    }
}

/// Pulls a human-readable message out of common error-body shapes:
/// `{"error": {"message": ...}}`, `{"error": "..."}` or `{"message": ...}`.
fn extract_error_message(json: &Value) -> Option<&str> {
    if let Some(error_obj) = json.get("error") {
        if let Some(msg) = error_obj.get("message").and_then(Value::as_str) {
            return Some(msg);
        }
        if let Some(msg) = error_obj.as_str() {
            return Some(msg);
        }
    }
    json.get("message").and_then(Value::as_str)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("Request timed out: {err}"))
        } else if err.is_decode() {
            Self::malformed(format!("Failed to decode response: {err}"))
        } else {
            Self::network(format!("Request failed: {err}"))
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
