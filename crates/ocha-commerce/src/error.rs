//! Commerce error types.

use ocha_data::FetchError;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur in cart, order and catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Transport or HTTP failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persisting cart state failed.
    #[error("Cache error: {0}")]
    Cache(#[from] ocha_cache::CacheError),

    /// The backend accepted an order but reloading the order list failed.
    #[error("Order placed, but refreshing the order list failed: {source}")]
    RefreshAfterOrder {
        /// Response body of the accepted order.
        created: Value,
        source: Box<CommerceError>,
    },
}

impl CommerceError {
    /// Message to show a user: the server's own wording when it sent one,
    /// otherwise this error's description.
    pub fn user_message(&self) -> String {
        match self {
            CommerceError::Fetch(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
            CommerceError::RefreshAfterOrder { source, .. } => source.user_message(),
            other => other.to_string(),
        }
    }

    /// Check if the backend rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CommerceError::Fetch(e) => e.is_unauthorized(),
            CommerceError::RefreshAfterOrder { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let server = CommerceError::Fetch(FetchError::HttpError {
            status: 422,
            message: Some("Store is closed".to_string()),
        });
        assert_eq!(server.user_message(), "Store is closed");

        let transport = CommerceError::Fetch(FetchError::RequestError("timed out".to_string()));
        assert_eq!(transport.user_message(), transport.to_string());
    }

    #[test]
    fn test_is_unauthorized() {
        let err = CommerceError::Fetch(FetchError::HttpError {
            status: 401,
            message: None,
        });
        assert!(err.is_unauthorized());

        let refresh = CommerceError::RefreshAfterOrder {
            created: Value::Null,
            source: Box::new(err),
        };
        assert!(refresh.is_unauthorized());
        assert!(!CommerceError::Cache(ocha_cache::CacheError::InvalidKey("".into())).is_unauthorized());
    }
}
