//! Where the client finds the bearer credential for each request.

use ocha_cache::{keys, Cache};

/// Supplies the bearer token attached to outgoing requests.
///
/// Consulted on every send, so a login or logout takes effect on the very
/// next request without rebuilding the client.
pub trait CredentialSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Reads the session credential from the persistent cache.
#[derive(Debug, Clone)]
pub struct CachedCredential {
    cache: Cache,
}

impl CachedCredential {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

impl CredentialSource for CachedCredential {
    fn bearer_token(&self) -> Option<String> {
        self.cache
            .load_or_default::<Option<String>>(keys::AUTH_TOKEN)
            .filter(|token| !token.trim().is_empty())
    }
}

/// Never sends a credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialSource for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

impl<F> CredentialSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn bearer_token(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_credential_reads_at_call_time() {
        let cache = Cache::in_memory();
        let source = CachedCredential::new(cache.clone());
        assert_eq!(source.bearer_token(), None);

        cache.set(keys::AUTH_TOKEN, "abc").unwrap();
        assert_eq!(source.bearer_token().as_deref(), Some("abc"));

        cache.delete(keys::AUTH_TOKEN).unwrap();
        assert_eq!(source.bearer_token(), None);
    }

    #[test]
    fn test_cached_credential_ignores_blank_and_null() {
        let cache = Cache::in_memory();
        let source = CachedCredential::new(cache.clone());

        cache.set(keys::AUTH_TOKEN, "  ").unwrap();
        assert_eq!(source.bearer_token(), None);

        cache.set(keys::AUTH_TOKEN, &Option::<String>::None).unwrap();
        assert_eq!(source.bearer_token(), None);
    }

    #[test]
    fn test_closure_source() {
        let source = || Some("static".to_string());
        assert_eq!(source.bearer_token().as_deref(), Some("static"));
        assert_eq!(Anonymous.bearer_token(), None);
    }
}
