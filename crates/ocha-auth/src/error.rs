//! Authentication errors.

use ocha_data::FetchError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend answered successfully but sent no credential.
    #[error("authentication response did not include a token")]
    MissingCredential,

    /// An operation needs a signed-in session.
    #[error("not signed in")]
    NotAuthenticated,

    /// Transport or HTTP failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] ocha_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AuthError::MissingCredential | AuthError::NotAuthenticated => true,
            AuthError::Fetch(e) => e.is_unauthorized(),
            AuthError::Cache(_) => false,
        }
    }

    /// Message to show a user: the server's own wording when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Fetch(e) => e.server_message().unwrap_or(fallback).to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server() {
        let err = AuthError::Fetch(FetchError::HttpError {
            status: 401,
            message: Some("Wrong password".to_string()),
        });
        assert_eq!(err.user_message("Unable to sign in."), "Wrong password");
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = AuthError::Fetch(FetchError::RequestError("dns".to_string()));
        assert_eq!(err.user_message("Unable to sign in."), "Unable to sign in.");
        assert!(!err.is_auth_failure());

        assert_eq!(
            AuthError::MissingCredential.user_message("Unable to sign in."),
            "Unable to sign in."
        );
    }
}
