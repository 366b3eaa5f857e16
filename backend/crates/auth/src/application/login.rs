//! Login Use Cases
//!
//! Phone + password in, fresh token out.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialStore;
use crate::application::issue_token::TokenIssuer;
use crate::domain::repository::{CustomerRepository, ManagerRepository, TokenRepository};
use crate::domain::value_object::{
    phone::Phone,
    token::{TokenScope, TokenValue},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub phone: String,
    pub password: String,
}

fn parse_login_phone(raw: &str) -> AuthResult<Phone> {
    // A phone that cannot be valid cannot be registered either
    Phone::new(raw).map_err(|_| AuthError::NoSuchUser)
}

/// Customer login use case
pub struct CustomerLoginUseCase<C, T>
where
    C: CustomerRepository,
    T: TokenRepository,
{
    customer_repo: Arc<C>,
    issuer: TokenIssuer<T>,
    credentials: CredentialStore,
}

impl<C, T> CustomerLoginUseCase<C, T>
where
    C: CustomerRepository,
    T: TokenRepository,
{
    pub fn new(customer_repo: Arc<C>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            customer_repo,
            issuer: TokenIssuer::new(token_repo, config.clone()),
            credentials: CredentialStore::new(config),
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<TokenValue> {
        let phone = parse_login_phone(&input.phone)?;

        let customer = self
            .customer_repo
            .find_customer_by_phone(&phone)
            .await?
            .ok_or(AuthError::NoSuchUser)?;

        if !self.credentials.verify(&customer.password, input.password) {
            return Err(AuthError::InvalidPassword);
        }

        if customer.is_blocked() {
            return Err(AuthError::AccountBlocked);
        }

        let token = self
            .issuer
            .issue(TokenScope::Customer, customer.id.value())
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer logged in");

        Ok(token.token)
    }
}

/// Manager login use case
pub struct ManagerLoginUseCase<M, T>
where
    M: ManagerRepository,
    T: TokenRepository,
{
    manager_repo: Arc<M>,
    issuer: TokenIssuer<T>,
    credentials: CredentialStore,
}

impl<M, T> ManagerLoginUseCase<M, T>
where
    M: ManagerRepository,
    T: TokenRepository,
{
    pub fn new(manager_repo: Arc<M>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            manager_repo,
            issuer: TokenIssuer::new(token_repo, config.clone()),
            credentials: CredentialStore::new(config),
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<TokenValue> {
        let phone = parse_login_phone(&input.phone)?;

        let manager = self
            .manager_repo
            .find_manager_by_phone(&phone)
            .await?
            .ok_or(AuthError::NoSuchUser)?;

        if !self.credentials.verify(&manager.password, input.password) {
            return Err(AuthError::InvalidPassword);
        }

        let token = self
            .issuer
            .issue(TokenScope::Manager, manager.id.value())
            .await?;

        tracing::info!(manager_id = %manager.id, "Manager logged in");

        Ok(token.token)
    }
}
