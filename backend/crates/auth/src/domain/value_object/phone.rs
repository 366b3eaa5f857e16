//! Phone Value Object
//!
//! The phone number doubles as the login for both customers and managers.
//!
//! ## Invariants
//! - Surrounding whitespace is trimmed
//! - 1 to [`PHONE_MAX_LENGTH`] characters
//! - Only digits, `+`, `-`, `(`, `)` and inner spaces
//! - At least one digit

use serde::Serialize;
use std::fmt;

use crate::error::AuthError;

/// Maximum phone length (in characters)
pub const PHONE_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AuthError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AuthError::InvalidInput("phone is required".into()));
        }
        if trimmed.chars().count() > PHONE_MAX_LENGTH {
            return Err(AuthError::InvalidInput(format!(
                "phone must be at most {PHONE_MAX_LENGTH} characters"
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
        {
            return Err(AuthError::InvalidInput("phone contains invalid characters".into()));
        }
        if !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::InvalidInput("phone must contain digits".into()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Rebuild from a stored value without re-validating
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_trimmed() {
        let phone = Phone::new("  +7 (900) 000-00-01 ").unwrap();
        assert_eq!(phone.as_str(), "+7 (900) 000-00-01");
    }

    #[test]
    fn test_phone_rejects_invalid() {
        assert!(matches!(Phone::new(""), Err(AuthError::InvalidInput(_))));
        assert!(matches!(Phone::new("   "), Err(AuthError::InvalidInput(_))));
        assert!(matches!(Phone::new("abc"), Err(AuthError::InvalidInput(_))));
        assert!(matches!(Phone::new("+-()"), Err(AuthError::InvalidInput(_))));
        assert!(matches!(
            Phone::new("1".repeat(PHONE_MAX_LENGTH + 1)),
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_phone_serializes_as_string() {
        let phone = Phone::new("89001234567").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"89001234567\"");
    }
}
