//! Backend address configuration.

use crate::FetchError;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the backend base address.
pub const API_URL_ENV: &str = "OCHA_API_URL";

/// Base address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Where the REST backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every request path is appended to, e.g. `https://host/api/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Create a config for an explicit base address.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let config = Self {
            base_url: base_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the base address is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), FetchError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(FetchError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.base_url, other
            ))),
        }
    }
}
