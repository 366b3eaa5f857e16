//! Register Customer Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialStore;
use crate::domain::entity::customer::{Customer, NewCustomer};
use crate::domain::repository::CustomerRepository;
use crate::domain::value_object::phone::Phone;
use crate::error::{AuthError, AuthResult};

/// Longest accepted display name
pub const NAME_MAX_LENGTH: usize = 100;

pub struct RegisterCustomerInput {
    pub name: String,
    pub phone: String,
    pub password: String,
}

/// Trimmed, non-empty, bounded display name
pub(crate) fn validate_name(raw: &str) -> AuthResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AuthError::InvalidInput("name is required".into()));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "name must be at most {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

pub struct RegisterCustomerUseCase<C>
where
    C: CustomerRepository,
{
    customer_repo: Arc<C>,
    credentials: CredentialStore,
}

impl<C> RegisterCustomerUseCase<C>
where
    C: CustomerRepository,
{
    pub fn new(customer_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            customer_repo,
            credentials: CredentialStore::new(config),
        }
    }

    pub async fn execute(&self, input: RegisterCustomerInput) -> AuthResult<Customer> {
        let name = validate_name(&input.name)?;
        let phone = Phone::new(&input.phone)?;

        if self.customer_repo.find_customer_by_phone(&phone).await?.is_some() {
            return Err(AuthError::PhoneTaken);
        }

        let password = self.credentials.hash(input.password)?;

        // The unique index still catches a concurrent registration
        let customer = self
            .customer_repo
            .create_customer(&NewCustomer {
                name,
                phone,
                password,
            })
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer registered");

        Ok(customer)
    }
}
