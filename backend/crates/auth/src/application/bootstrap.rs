//! Bootstrap Admin Use Case
//!
//! Manager registration is admin-only, so a fresh database needs one
//! `{MANAGER, ADMIN}` account created out of band at startup.

use std::sync::Arc;

use kernel::id::ManagerId;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialStore;
use crate::application::register_customer::validate_name;
use crate::domain::entity::manager::NewManager;
use crate::domain::repository::ManagerRepository;
use crate::domain::value_object::{
    phone::Phone,
    role::{Role, RoleSet},
};
use crate::error::AuthResult;

pub struct BootstrapAdminInput {
    pub name: String,
    pub phone: String,
    pub password: String,
}

pub struct BootstrapAdminUseCase<M>
where
    M: ManagerRepository,
{
    manager_repo: Arc<M>,
    credentials: CredentialStore,
}

impl<M> BootstrapAdminUseCase<M>
where
    M: ManagerRepository,
{
    pub fn new(manager_repo: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            manager_repo,
            credentials: CredentialStore::new(config),
        }
    }

    /// `Some(id)` when an account was created, `None` when the phone exists
    pub async fn execute(&self, input: BootstrapAdminInput) -> AuthResult<Option<ManagerId>> {
        let phone = Phone::new(&input.phone)?;

        if let Some(existing) = self.manager_repo.find_manager_by_phone(&phone).await? {
            tracing::debug!(manager_id = %existing.id, "Bootstrap admin already present");
            return Ok(None);
        }

        let manager = self
            .manager_repo
            .create_manager(&NewManager {
                name: validate_name(&input.name)?,
                phone,
                password: self.credentials.hash(input.password)?,
                roles: RoleSet::new([Role::Manager, Role::Admin]),
            })
            .await?;

        tracing::info!(manager_id = %manager.id, "Bootstrap admin created");

        Ok(Some(manager.id))
    }
}
