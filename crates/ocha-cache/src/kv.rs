//! Key-Value store wrapper with automatic serialization.

use crate::{CacheError, FileStore, KvStore, MemoryStore};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Type-safe cache over a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and every clone
/// shares the same backing store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Open a file-backed cache rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("/var/lib/ocha")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(FileStore::open(dir)?)))
    }

    /// Create a cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// value cannot be decoded as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let token: Option<String> = cache.get(keys::AUTH_TOKEN)?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when it is missing,
    /// unreadable or malformed.
    ///
    /// Damaged entries are logged and left in place; the next `set` on the
    /// key overwrites them.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable cache entry");
                T::default()
            }
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set(keys::CART_ITEMS, &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key)?.is_some())
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::in_memory();
        let lines = vec![Line {
            id: "p1".to_string(),
            quantity: 2,
        }];
        cache.set(keys::CART_ITEMS, &lines).unwrap();

        let loaded: Option<Vec<Line>> = cache.get(keys::CART_ITEMS).unwrap();
        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::in_memory();
        let value: Option<String> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_get_malformed_is_error() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CART_ITEMS, "{not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Line>>, _> = cache.get(keys::CART_ITEMS);
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_load_or_default_tolerates_corruption() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CART_ITEMS, "[{\"id\": 1,").unwrap();
        let cache = Cache::new(store);

        let lines: Vec<Line> = cache.load_or_default(keys::CART_ITEMS);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_load_or_default_wrong_shape() {
        let cache = Cache::in_memory();
        cache.set(keys::AUTH_TOKEN, &42).unwrap();

        let token: Option<String> = cache.load_or_default(keys::AUTH_TOKEN);
        assert_eq!(token, None);
    }

    #[test]
    fn test_clones_share_store() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set(keys::AUTH_TOKEN, "tok").unwrap();

        assert!(other.exists(keys::AUTH_TOKEN).unwrap());
        other.delete(keys::AUTH_TOKEN).unwrap();
        assert!(!cache.exists(keys::AUTH_TOKEN).unwrap());
    }

    #[test]
    fn test_open_file_backed() {
        let dir = tempfile::tempdir().unwrap();
        Cache::open(dir.path())
            .unwrap()
            .set(keys::AUTH_TOKEN, "persisted")
            .unwrap();

        let token: Option<String> = Cache::open(dir.path())
            .unwrap()
            .get(keys::AUTH_TOKEN)
            .unwrap();
        assert_eq!(token.as_deref(), Some("persisted"));
        assert_eq!(
            Cache::open(dir.path()).unwrap().keys().unwrap(),
            vec![keys::AUTH_TOKEN.to_string()]
        );
    }
}
