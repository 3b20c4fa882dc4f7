//! Persistent key-value cache for the OCHA storefront client.
//!
//! Stores survive process restarts the way browser local storage survives a
//! page reload: every value is JSON-encoded under a short string key and
//! written through to the backing [`KvStore`] immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use ocha_cache::{keys, Cache};
//!
//! let cache = Cache::open("/var/lib/ocha")?;
//!
//! // Store a value
//! cache.set(keys::CART_ITEMS, &lines)?;
//!
//! // Retrieve it, falling back to an empty cart if the file is damaged
//! let lines: Vec<CartLine> = cache.load_or_default(keys::CART_ITEMS);
//!
//! // Delete a value
//! cache.delete(keys::AUTH_TOKEN)?;
//! ```

mod error;
mod kv;
mod store;

pub mod keys;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{keys, Cache, CacheError, FileStore, KvStore, MemoryStore};
}
