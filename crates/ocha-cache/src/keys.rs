//! Well-known cache keys shared by the stores and the HTTP adapter.

/// Bearer credential of the current session.
pub const AUTH_TOKEN: &str = "auth_token";

/// JSON list of cart lines.
pub const CART_ITEMS: &str = "cart_items";

/// Check that a key only uses characters every backend can store verbatim.
pub fn is_valid(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_keys_are_valid() {
        assert!(is_valid(AUTH_TOKEN));
        assert!(is_valid(CART_ITEMS));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        assert!(!is_valid(""));
        assert!(!is_valid("../etc/passwd"));
        assert!(!is_valid("a/b"));
        assert!(!is_valid(".hidden"));
        assert!(!is_valid("with space"));
    }
}
