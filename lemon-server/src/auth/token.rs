//! Opaque API tokens
//!
//! A key is 20 random bytes, hex encoded (40 chars). The client sends it as
//! `Authorization: Token <key>` (`Bearer <key>` is accepted too); the store
//! only ever sees its SHA-256 digest.

use rand::RngCore;
use sha2::{Digest, Sha256};

const KEY_BYTES: usize = 20;

/// Generate a fresh key
pub fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest stored in place of the key
pub fn hash_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Extract the key from an `Authorization` header value
pub fn extract_from_header(header: &str) -> Option<&str> {
    let (scheme, key) = header.trim().split_once(' ')?;
    if !(scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")) {
        return None;
    }
    let key = key.trim();
    (!key.is_empty() && !key.contains(' ')).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_40_hex_chars_and_unique() {
        let a = generate_key();
        let b = generate_key();
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_sha256() {
        let h = hash_key("abc");
        assert_eq!(h, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        assert_eq!(hash_key("abc"), h);
    }

    #[test]
    fn header_schemes() {
        assert_eq!(extract_from_header("Token abc123"), Some("abc123"));
        assert_eq!(extract_from_header("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_from_header("token   abc123 "), Some("abc123"));
        assert_eq!(extract_from_header("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_from_header("Token"), None);
        assert_eq!(extract_from_header("Token a b"), None);
    }
}
