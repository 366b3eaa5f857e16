//! Credential Store
//!
//! Thin layer over `platform::password` that applies the configured pepper
//! and turns failures into `AuthError`s.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct CredentialStore {
    config: Arc<AuthConfig>,
}

impl CredentialStore {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Validate against the password policy and hash.
    ///
    /// A hashing failure is `AuthError::Internal`, never a panic.
    pub fn hash(&self, raw: String) -> AuthResult<HashedPassword> {
        let password = ClearTextPassword::new(raw)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// `false` for a mismatch and for input that could never have been hashed
    pub fn verify(&self, hash: &HashedPassword, raw: String) -> bool {
        match ClearTextPassword::new(raw) {
            Ok(password) => hash.verify(&password, self.config.pepper()),
            Err(_) => false,
        }
    }
}
