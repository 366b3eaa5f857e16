//! Opaque access tokens

use std::fmt;

use crate::error::AuthError;

/// Which token table a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScope {
    Customer,
    Manager,
}

impl TokenScope {
    pub const fn code(&self) -> &'static str {
        match self {
            TokenScope::Customer => "customer",
            TokenScope::Manager => "manager",
        }
    }
}

/// Hex-encoded random token.
///
/// `Debug` shows only a short prefix so tokens never reach the logs whole.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenValue(String);

impl TokenValue {
    /// Fresh token of `byte_len` random bytes
    pub fn generate(byte_len: usize) -> Self {
        Self(platform::crypto::random_hex_token(byte_len))
    }

    /// Accept a client-supplied token if it has the issued shape
    pub fn parse(raw: &str, byte_len: usize) -> Result<Self, AuthError> {
        if platform::crypto::is_hex_token(raw, byte_len) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(AuthError::InvalidToken)
        }
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "TokenValue({prefix}...)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_parse() {
        let token = TokenValue::generate(256);
        assert_eq!(token.as_str().len(), 512);
        assert_eq!(TokenValue::parse(token.as_str(), 256).unwrap(), token);
    }

    #[test]
    fn test_parse_normalizes_case() {
        let upper = "AB".repeat(4);
        assert_eq!(TokenValue::parse(&upper, 4).unwrap().as_str(), "abababab");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(TokenValue::parse("", 256), Err(AuthError::InvalidToken)));
        assert!(matches!(TokenValue::parse("xyz", 256), Err(AuthError::InvalidToken)));
        assert!(matches!(
            TokenValue::parse(&"0".repeat(510), 256),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_debug_is_truncated() {
        let token = TokenValue::generate(256);
        let debug = format!("{:?}", token);
        assert!(debug.len() < 32);
        assert!(!debug.contains(&token.as_str()[8..40]));
    }
}
