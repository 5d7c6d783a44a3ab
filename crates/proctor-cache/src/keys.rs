//! Key builders for every entry Proctor writes to the key-value store.
//!
//! Backend-level prefixes (`cache.redis.key_prefix`) are applied by the
//! provider, not here.

/// Ledger key for an outstanding refresh token.
///
/// The raw token string is the key suffix, so presence of the key is the
/// whole record of "issued and not yet redeemed".
pub fn refresh_token(token: &str) -> String {
    format!("refresh:{token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_key() {
        assert_eq!(refresh_token("abc.def.ghi"), "refresh:abc.def.ghi");
    }
}
