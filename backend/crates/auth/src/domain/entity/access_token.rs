//! Access Token Entity

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::value_object::token::{TokenScope, TokenValue};

/// An issued token. Never deleted; it simply stops resolving once
/// `issued_at + window` has passed.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: TokenValue,
    /// Customer or manager id, depending on `scope`
    pub owner_id: i64,
    pub scope: TokenScope,
    pub issued_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: TokenValue, owner_id: i64, scope: TokenScope, issued_at: DateTime<Utc>) -> Self {
        Self {
            token,
            owner_id,
            scope,
            issued_at,
        }
    }

    pub fn expires_at(&self, window: TimeDelta) -> Option<DateTime<Utc>> {
        self.issued_at.checked_add_signed(window)
    }

    /// Expired once `now >= issued_at + window`
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        match self.expires_at(window) {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_issued_at(issued_at: DateTime<Utc>) -> AccessToken {
        AccessToken::new(TokenValue::generate(8), 1, TokenScope::Customer, issued_at)
    }

    #[test]
    fn test_expiry_boundary() {
        let issued = Utc::now();
        let window = TimeDelta::hours(1);
        let token = token_issued_at(issued);

        assert!(!token.is_expired_at(issued, window));
        assert!(!token.is_expired_at(issued + window - TimeDelta::milliseconds(1), window));
        assert!(token.is_expired_at(issued + window, window));
        assert!(token.is_expired_at(issued + window + TimeDelta::seconds(1), window));
    }

    #[test]
    fn test_huge_window_never_expires() {
        let token = token_issued_at(Utc::now());
        assert!(!token.is_expired_at(Utc::now(), TimeDelta::MAX));
    }
}
