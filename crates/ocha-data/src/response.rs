//! HTTP response handling.

use crate::FetchError;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with the given status.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as a JSON document, normalizing an empty or malformed
    /// body to `Null`.
    pub fn json_or_null(&self) -> serde_json::Value {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::Value::Null;
        }
        match serde_json::from_slice(&self.body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(status = self.status, error = %e, "response body is not JSON");
                serde_json::Value::Null
            }
        }
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error carries the `message` field of a JSON body when present.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpError {
                status: self.status,
                message: self.server_message(),
            })
        }
    }

    fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        ["message", "error"]
            .iter()
            .filter_map(|field| value.get(field).and_then(|m| m.as_str()))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    // === Status Check Tests ===

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(201, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
    }

    // === Body Tests ===

    #[test]
    fn test_json_or_null_normalizes() {
        assert_eq!(make_response(204, b"").json_or_null(), serde_json::Value::Null);
        assert_eq!(make_response(200, b"  \n").json_or_null(), serde_json::Value::Null);
        assert_eq!(make_response(200, b"<html>").json_or_null(), serde_json::Value::Null);
        assert_eq!(
            make_response(200, br#"{"orders": []}"#).json_or_null(),
            json!({"orders": []})
        );
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let resp = Response::json_body(200, &json!({}));
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    // === error_for_status Tests ===

    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_extracts_message() {
        let resp = Response::json_body(401, &json!({"message": "Invalid credentials"}));
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            }
        );
    }

    #[test]
    fn test_error_for_status_falls_back_to_error_field() {
        let resp = Response::json_body(400, &json!({"error": "email taken"}));
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(err.server_message(), Some("email taken"));
    }

    #[test]
    fn test_error_for_status_plain_body() {
        let err = make_response(502, b"Bad Gateway").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.server_message(), None);
    }
}
