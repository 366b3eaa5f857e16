//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Opaque token: `byte_len` random bytes, lowercase hex (`2 * byte_len` chars)
pub fn random_hex_token(byte_len: usize) -> String {
    hex::encode(random_bytes(byte_len))
}

/// Whether `s` has the shape of a token produced by [`random_hex_token`]
pub fn is_hex_token(s: &str, byte_len: usize) -> bool {
    s.len() == byte_len * 2 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode base64 to bytes (configuration secrets)
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_hex_token_shape() {
        let token = random_hex_token(256);
        assert_eq!(token.len(), 512);
        assert!(is_hex_token(&token, 256));
        assert_ne!(token, random_hex_token(256));
    }

    #[test]
    fn test_is_hex_token_rejects() {
        assert!(!is_hex_token("", 256));
        assert!(!is_hex_token(&"a".repeat(511), 256));
        assert!(!is_hex_token(&"z".repeat(512), 256));
        assert!(is_hex_token("0aF9", 2));
    }

    #[test]
    fn test_from_base64() {
        assert_eq!(from_base64("aGVsbG8=\n").unwrap(), b"hello");
        assert!(from_base64("%%%").is_err());
    }
}
