//! Auth Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers, guards
//!
//! ## Features
//! - Customer and manager registration / login by phone + password
//! - Opaque 256-byte hex tokens with a one hour validity window
//! - Role-gated manager access (`MANAGER`, `MANAGER` + `ADMIN`)
//! - Customer lifecycle: list, update, block, unblock, remove
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Tokens are never deleted; they stop resolving once expired
//! - Blocked customers can neither log in nor use existing tokens

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::router::{customers_router, managers_router};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::{access_token::*, customer::*, manager::*};
    pub use crate::domain::value_object::{phone::*, role::*, token::*};
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
