//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use ocha_sdk::prelude::*;
//! ```

// Context and configuration
pub use crate::{AppConfig, ConfigError, SdkError, StorageConfig, Storefront};

// Persistence and transport
pub use ocha_cache::{keys, Cache, CacheError};
pub use ocha_data::{ApiClient, ApiConfig, FetchError, Transport};

// Session
pub use ocha_auth::{AuthError, Profile, Role, SessionStatus, SessionStore};

// Commerce
pub use ocha_commerce::prelude::*;
