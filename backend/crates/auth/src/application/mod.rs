//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod issue_token;
pub mod login;
pub mod manage_customers;
pub mod register_customer;
pub mod register_manager;
pub mod resolve_token;

// Re-exports
pub use bootstrap::{BootstrapAdminInput, BootstrapAdminUseCase};
pub use config::AuthConfig;
pub use credentials::CredentialStore;
pub use issue_token::TokenIssuer;
pub use login::{CustomerLoginUseCase, LoginInput, ManagerLoginUseCase};
pub use manage_customers::{ManageCustomersUseCase, UpdateCustomerInput};
pub use register_customer::{RegisterCustomerInput, RegisterCustomerUseCase};
pub use register_manager::{RegisterManagerInput, RegisterManagerOutput, RegisterManagerUseCase};
pub use resolve_token::TokenValidator;
