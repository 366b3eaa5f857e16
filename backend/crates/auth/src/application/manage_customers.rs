//! Customer lifecycle, as seen by managers
//!
//! List, get, update, block, unblock and remove. Every missing id is
//! `AuthError::CustomerNotFound`.

use std::sync::Arc;

use kernel::id::CustomerId;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialStore;
use crate::application::register_customer::validate_name;
use crate::domain::entity::customer::{Customer, CustomerChanges};
use crate::domain::repository::CustomerRepository;
use crate::domain::value_object::phone::Phone;
use crate::error::{AuthError, AuthResult};

pub struct UpdateCustomerInput {
    pub name: String,
    pub phone: String,
    /// Replaces the password when present
    pub password: Option<String>,
}

pub struct ManageCustomersUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
    credentials: CredentialStore,
}

impl<C> ManageCustomersUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            customer_repo,
            credentials: CredentialStore::new(config),
        }
    }

    pub async fn list_all(&self) -> AuthResult<Vec<Customer>> {
        self.customer_repo.list_customers(false).await
    }

    pub async fn list_active(&self) -> AuthResult<Vec<Customer>> {
        self.customer_repo.list_customers(true).await
    }

    pub async fn get(&self, id: CustomerId) -> AuthResult<Customer> {
        self.customer_repo
            .find_customer(id)
            .await?
            .ok_or(AuthError::CustomerNotFound)
    }

    pub async fn update(&self, id: CustomerId, input: UpdateCustomerInput) -> AuthResult<Customer> {
        let name = validate_name(&input.name)?;
        let phone = Phone::new(&input.phone)?;

        if let Some(other) = self.customer_repo.find_customer_by_phone(&phone).await? {
            if other.id != id {
                return Err(AuthError::PhoneTaken);
            }
        }

        let password = input
            .password
            .map(|raw| self.credentials.hash(raw))
            .transpose()?;

        let customer = self
            .customer_repo
            .update_customer(
                id,
                &CustomerChanges {
                    name,
                    phone,
                    password,
                },
            )
            .await?
            .ok_or(AuthError::CustomerNotFound)?;

        tracing::info!(customer_id = %id, "Customer updated");

        Ok(customer)
    }

    pub async fn block(&self, id: CustomerId) -> AuthResult<Customer> {
        let customer = self.set_active(id, false).await?;
        tracing::info!(customer_id = %id, "Customer blocked");
        Ok(customer)
    }

    pub async fn unblock(&self, id: CustomerId) -> AuthResult<Customer> {
        let customer = self.set_active(id, true).await?;
        tracing::info!(customer_id = %id, "Customer unblocked");
        Ok(customer)
    }

    pub async fn remove(&self, id: CustomerId) -> AuthResult<Customer> {
        let customer = self
            .customer_repo
            .remove_customer(id)
            .await?
            .ok_or(AuthError::CustomerNotFound)?;

        tracing::info!(customer_id = %id, "Customer removed");

        Ok(customer)
    }

    async fn set_active(&self, id: CustomerId, active: bool) -> AuthResult<Customer> {
        self.customer_repo
            .set_customer_active(id, active)
            .await?
            .ok_or(AuthError::CustomerNotFound)
    }
}
