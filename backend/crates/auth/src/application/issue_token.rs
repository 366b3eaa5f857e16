//! Token Issuer

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::access_token::AccessToken;
use crate::domain::repository::TokenRepository;
use crate::domain::value_object::token::{TokenScope, TokenValue};
use crate::error::AuthResult;

/// Generates and records tokens.
///
/// There is no retry on collision: a duplicate key from the store surfaces
/// as an error like any other write failure.
pub struct TokenIssuer<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<T> TokenIssuer<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self { token_repo, config }
    }

    pub async fn issue(&self, scope: TokenScope, owner_id: i64) -> AuthResult<AccessToken> {
        let token = AccessToken::new(
            TokenValue::generate(self.config.token_bytes),
            owner_id,
            scope,
            Utc::now(),
        );

        self.token_repo.create_token(&token).await?;

        tracing::debug!(scope = scope.code(), owner_id, "Token issued");

        Ok(token)
    }
}
