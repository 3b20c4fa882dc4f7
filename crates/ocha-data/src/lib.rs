//! HTTP client adapter for the OCHA storefront client.
//!
//! One [`ApiClient`] is shared by every store. It owns the backend base
//! address, sends JSON, and attaches the session's bearer credential to each
//! request at send time.
//!
//! # Example
//!
//! ```rust,ignore
//! use ocha_data::{ApiClient, ApiConfig, CachedCredential, ReqwestTransport};
//! use std::sync::Arc;
//!
//! let client = ApiClient::new(
//!     &ApiConfig::new("http://localhost:3000/api/v1")?,
//!     Arc::new(ReqwestTransport::new()?),
//!     Arc::new(CachedCredential::new(cache.clone())),
//! );
//!
//! // Simple GET request; the body is normalized to `Null` if it is not JSON
//! let body = client.get_json("/users/me/orders").await?;
//!
//! // POST with JSON body
//! let created = client
//!     .post("/orders")
//!     .json(&payload)?
//!     .send()
//!     .await?
//!     .error_for_status()?;
//! ```

mod config;
mod credential;
mod error;
mod request;
mod response;
mod transport;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use config::{ApiConfig, API_URL_ENV, DEFAULT_BASE_URL};
pub use credential::{Anonymous, CachedCredential, CredentialSource};
pub use error::FetchError;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// HTTP client for the storefront backend.
///
/// Cloning is cheap; clones share the transport and credential source.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client sending JSON to `config.base_url`.
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert(
            http::header::CONTENT_TYPE.as_str().to_string(),
            "application/json".to_string(),
        );
        default_headers.insert(
            http::header::ACCEPT.as_str().to_string(),
            "application/json".to_string(),
        );
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers,
            transport,
            credentials,
        }
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// The base address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request.
    pub fn get(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a request with a custom method.
    ///
    /// Absolute `http(s)://` URLs bypass the base address.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ClientRequestBuilder {
        let path = path.into();
        let full_url = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        let builder = RequestBuilder::new(method, full_url).headers(
            self.default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
            credentials: Arc::clone(&self.credentials),
        }
    }

    /// GET `path`, fail on non-2xx, and return the body as JSON.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value, FetchError> {
        let response = self.get(path).send().await?.error_for_status()?;
        Ok(response.json_or_null())
    }

    /// POST `body` as JSON to `path`, fail on non-2xx, and return the body as JSON.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, FetchError> {
        let response = self
            .post(path)
            .json(body)?
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json_or_null())
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialSource>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Attach the current credential and send the request.
    ///
    /// Any `Authorization` header set by the caller is replaced: the
    /// credential source is the only authority on what is sent.
    pub async fn send(self) -> Result<Response, FetchError> {
        let builder = self.builder.remove_header(http::header::AUTHORIZATION);
        let builder = match self.credentials.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let request = builder.build();

        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(%method, %url, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, CredentialSource, FetchError, Method, Response};
}
