//! Register Manager Use Case
//!
//! Admin-only. The new manager gets a token straight away.

use std::sync::Arc;

use kernel::id::ManagerId;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialStore;
use crate::application::issue_token::TokenIssuer;
use crate::application::register_customer::validate_name;
use crate::domain::entity::manager::NewManager;
use crate::domain::repository::{ManagerRepository, TokenRepository};
use crate::domain::value_object::{
    phone::Phone,
    role::RoleSet,
    token::{TokenScope, TokenValue},
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterManagerInput {
    pub name: String,
    pub phone: String,
    pub password: String,
    /// Exact labels, e.g. `["MANAGER"]`
    pub roles: Vec<String>,
}

pub struct RegisterManagerOutput {
    pub manager_id: ManagerId,
    pub token: TokenValue,
}

pub struct RegisterManagerUseCase<M, T>
where
    M: ManagerRepository,
    T: TokenRepository,
{
    manager_repo: Arc<M>,
    issuer: TokenIssuer<T>,
    credentials: CredentialStore,
}

impl<M, T> RegisterManagerUseCase<M, T>
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

    pub async fn execute(&self, input: RegisterManagerInput) -> AuthResult<RegisterManagerOutput> {
        let name = validate_name(&input.name)?;
        let phone = Phone::new(&input.phone)?;
        let roles = RoleSet::parse_strict(&input.roles).map_err(AuthError::InvalidInput)?;

        if self.manager_repo.find_manager_by_phone(&phone).await?.is_some() {
            return Err(AuthError::PhoneTaken);
        }

        let password = self.credentials.hash(input.password)?;

        let manager = self
            .manager_repo
            .create_manager(&NewManager {
                name,
                phone,
                password,
                roles,
            })
            .await?;

        let token = self
            .issuer
            .issue(TokenScope::Manager, manager.id.value())
            .await?;

        tracing::info!(
            manager_id = %manager.id,
            roles = ?manager.roles.labels(),
            "Manager registered"
        );

        Ok(RegisterManagerOutput {
            manager_id: manager.id,
            token: token.token,
        })
    }
}
