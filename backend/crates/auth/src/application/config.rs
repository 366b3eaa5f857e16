//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use chrono::TimeDelta;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long an issued token resolves (1 hour)
    pub token_ttl: Duration,
    /// Random bytes per token; the hex form is twice as long
    pub token_bytes: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),
            token_bytes: 256,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (short-lived tokens for manual testing)
    pub fn development() -> Self {
        Self {
            token_ttl: Duration::from_secs(15 * 60),
            ..Default::default()
        }
    }

    /// Token validity window as a signed delta for timestamp arithmetic
    pub fn token_window(&self) -> TimeDelta {
        TimeDelta::from_std(self.token_ttl).unwrap_or(TimeDelta::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_one_hour() {
        let config = AuthConfig::default();
        assert_eq!(config.token_window(), TimeDelta::hours(1));
        assert_eq!(config.token_bytes, 256);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_is_shorter() {
        assert!(AuthConfig::development().token_ttl < AuthConfig::default().token_ttl);
    }
}
