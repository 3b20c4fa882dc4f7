//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    HttpError {
        status: u16,
        /// The `message` field of a JSON error body, when the server sent one.
        message: Option<String>,
    },

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// The human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::HttpError { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of an error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the caller's credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_prefers_server_message() {
        let err = FetchError::HttpError {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 401: Invalid credentials");
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_http_error_display_without_message() {
        let err = FetchError::HttpError {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 500: request failed");
        assert_eq!(err.server_message(), None);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = FetchError::RequestError("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.server_message(), None);
    }
}
