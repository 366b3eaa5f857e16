//! Token Validator
//!
//! Resolves an opaque token to the id of its owner.
//!
//! Checks run in order: shape, existence, expiry, then the owner
//! (blocked customer, or manager roles against the requested level).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ManagerId};

use crate::application::config::AuthConfig;
use crate::domain::entity::access_token::AccessToken;
use crate::domain::repository::{CustomerRepository, ManagerRepository, TokenRepository};
use crate::domain::value_object::{
    role::AccessLevel,
    token::{TokenScope, TokenValue},
};
use crate::error::{AuthError, AuthResult};

pub struct TokenValidator<C, M, T>
where
    C: CustomerRepository,
    M: ManagerRepository,
    T: TokenRepository,
{
    customer_repo: Arc<C>,
    manager_repo: Arc<M>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<C, M, T> TokenValidator<C, M, T>
where
    C: CustomerRepository,
    M: ManagerRepository,
    T: TokenRepository,
{
    pub fn new(
        customer_repo: Arc<C>,
        manager_repo: Arc<M>,
        token_repo: Arc<T>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            customer_repo,
            manager_repo,
            token_repo,
            config,
        }
    }

    pub async fn resolve_customer(&self, raw: &str) -> AuthResult<CustomerId> {
        self.resolve_customer_at(raw, Utc::now()).await
    }

    pub async fn resolve_manager(&self, raw: &str, level: AccessLevel) -> AuthResult<ManagerId> {
        self.resolve_manager_at(raw, level, Utc::now()).await
    }

    pub(crate) async fn resolve_customer_at(
        &self,
        raw: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<CustomerId> {
        let token = self.live_token(TokenScope::Customer, raw, now).await?;
        let customer_id = CustomerId::new(token.owner_id);

        // Token outlived its owner
        let customer = self
            .customer_repo
            .find_customer(customer_id)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if customer.is_blocked() {
            return Err(AuthError::AccountBlocked);
        }

        Ok(customer_id)
    }

    pub(crate) async fn resolve_manager_at(
        &self,
        raw: &str,
        level: AccessLevel,
        now: DateTime<Utc>,
    ) -> AuthResult<ManagerId> {
        let token = self.live_token(TokenScope::Manager, raw, now).await?;
        let manager_id = ManagerId::new(token.owner_id);

        let manager = self
            .manager_repo
            .find_manager(manager_id)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if !manager.active || !manager.roles.grants(level) {
            tracing::debug!(manager_id = %manager_id, ?level, "Access level not granted");
            return Err(AuthError::NoPermissions);
        }

        Ok(manager_id)
    }

    async fn live_token(
        &self,
        scope: TokenScope,
        raw: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<AccessToken> {
        let value = TokenValue::parse(raw, self.config.token_bytes)?;

        let token = self
            .token_repo
            .find_token(scope, &value)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if token.is_expired_at(now, self.config.token_window()) {
            return Err(AuthError::TokenExpired);
        }

        Ok(token)
    }
}
