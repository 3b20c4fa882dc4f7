//! Error types for the storefront context.

use ocha_auth::AuthError;
use ocha_cache::CacheError;
use ocha_commerce::CommerceError;
use ocha_data::FetchError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered.
    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// Backend settings are unusable.
    #[error("Invalid API configuration: {0}")]
    Api(#[from] FetchError),

    /// Any other invalid value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by [`Storefront`](crate::Storefront).
#[derive(Error, Debug)]
pub enum SdkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Checkout was attempted with nothing in the cart.
    #[error("the cart is empty")]
    EmptyCart,
}

impl SdkError {
    /// Message to show a user.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Auth(e) => e.user_message(&e.to_string()),
            SdkError::Commerce(e) => e.user_message(),
            SdkError::Fetch(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
            other => other.to_string(),
        }
    }
}
