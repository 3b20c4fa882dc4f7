//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
        }
    }
}

/// A fully built request, ready for a [`Transport`](crate::Transport).
///
/// Header names are stored lowercase.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parse the body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request, replacing any previous value.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (key, value) in headers {
            self = self.header(key, value);
        }
        self
    }

    /// Drop a header if present.
    pub fn remove_header(mut self, key: impl AsRef<str>) -> Self {
        self.headers.remove(&key.as_ref().to_ascii_lowercase());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self = self.content_type("application/json");
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header(
            http::header::AUTHORIZATION,
            format!("Bearer {}", token.as_ref()),
        )
    }

    /// Set the Content-Type header.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.header(http::header::CONTENT_TYPE, content_type)
    }

    /// Finish building.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let request = RequestBuilder::new(Method::Get, "http://x/a")
            .header("X-Trace", "1")
            .build();
        assert_eq!(request.header("x-trace"), Some("1"));
        assert_eq!(request.header("X-TRACE"), Some("1"));
    }

    #[test]
    fn test_bearer_auth_and_removal() {
        let builder = RequestBuilder::new(Method::Get, "http://x/a").bearer_auth("tok");
        assert_eq!(
            builder.clone().build().header("Authorization"),
            Some("Bearer tok")
        );

        let request = builder.remove_header("AUTHORIZATION").build();
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestBuilder::new(Method::Post, "http://x/a")
            .json(&serde_json::json!({"email": "a@b.c"}))
            .unwrap()
            .build();
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.json_body(),
            Some(serde_json::json!({"email": "a@b.c"}))
        );
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(http::Method::from(Method::Post), http::Method::POST);
        assert_eq!(Method::Get.to_string(), "GET");
    }
}
