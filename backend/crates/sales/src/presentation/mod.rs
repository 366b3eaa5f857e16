//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::SalesAppState;
pub use router::{
    catalog_router, catalog_router_generic, manager_router, manager_router_generic,
    purchases_router, purchases_router_generic,
};
