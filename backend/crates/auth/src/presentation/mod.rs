//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and guards.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{extract_token, require_admin, require_customer, require_manager};
pub use router::{
    customers_router, customers_router_generic, managers_router, managers_router_generic,
};
