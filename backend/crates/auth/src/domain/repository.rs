//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CustomerId, ManagerId};

use crate::domain::entity::{
    access_token::AccessToken,
    customer::{Customer, CustomerChanges, NewCustomer},
    manager::{Manager, NewManager},
};
use crate::domain::value_object::{
    phone::Phone,
    token::{TokenScope, TokenValue},
};
use crate::error::AuthResult;

/// Customer repository trait
#[trait_variant::make(CustomerRepository: Send)]
pub trait LocalCustomerRepository {
    /// Insert; a duplicate phone is `AuthError::PhoneTaken`
    async fn create_customer(&self, customer: &NewCustomer) -> AuthResult<Customer>;

    async fn find_customer(&self, id: CustomerId) -> AuthResult<Option<Customer>>;

    async fn find_customer_by_phone(&self, phone: &Phone) -> AuthResult<Option<Customer>>;

    /// All customers ordered by id, or only the active ones
    async fn list_customers(&self, only_active: bool) -> AuthResult<Vec<Customer>>;

    /// `None` when the id does not exist
    async fn update_customer(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
    ) -> AuthResult<Option<Customer>>;

    /// Block (`false`) or unblock (`true`); `None` when the id does not exist
    async fn set_customer_active(
        &self,
        id: CustomerId,
        active: bool,
    ) -> AuthResult<Option<Customer>>;

    /// Hard delete, returning the removed record
    async fn remove_customer(&self, id: CustomerId) -> AuthResult<Option<Customer>>;
}

/// Manager repository trait
#[trait_variant::make(ManagerRepository: Send)]
pub trait LocalManagerRepository {
    /// Insert; a duplicate phone is `AuthError::PhoneTaken`
    async fn create_manager(&self, manager: &NewManager) -> AuthResult<Manager>;

    async fn find_manager(&self, id: ManagerId) -> AuthResult<Option<Manager>>;

    async fn find_manager_by_phone(&self, phone: &Phone) -> AuthResult<Option<Manager>>;
}

/// Token repository trait
#[trait_variant::make(TokenRepository: Send)]
pub trait LocalTokenRepository {
    async fn create_token(&self, token: &AccessToken) -> AuthResult<()>;

    async fn find_token(
        &self,
        scope: TokenScope,
        token: &TokenValue,
    ) -> AuthResult<Option<AccessToken>>;
}

/// Everything the HTTP layer needs from one store
pub trait AuthRepository:
    CustomerRepository + ManagerRepository + TokenRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthRepository for T where
    T: CustomerRepository + ManagerRepository + TokenRepository + Clone + Send + Sync + 'static
{
}
