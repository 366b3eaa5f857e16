//! Sales Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, stock rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Consistency Model
//! - A sale is one database transaction: header, stock decrements and
//!   positions commit together or not at all
//! - Stock is decremented with a guarded `UPDATE`, so it never goes negative
//!   and concurrent sales of one product serialize on its row lock
//! - Positions keep the unit price the product had when it was sold

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SalesConfig;
pub use error::{SalesError, SalesResult};
pub use infra::postgres::PgSalesRepository;
pub use presentation::handlers::SalesAppState;
pub use presentation::router::{catalog_router, manager_router, purchases_router};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::{product::*, purchase::*, sale::*};
    pub use crate::domain::services::StockLevel;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgSalesRepository as SalesStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
