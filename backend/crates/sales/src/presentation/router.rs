//! Sales Routers
//!
//! The routers carry no guards of their own. The binary wraps
//! `purchases_*` in the customer guard and `manager_*` in the manager guard;
//! both guards insert the typed id the handlers extract.

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::SalesConfig;
use crate::domain::repository::SalesRepository;
use crate::infra::postgres::PgSalesRepository;
use crate::presentation::handlers::{self, SalesAppState};

/// Public catalog routes with PostgreSQL repository
pub fn catalog_router(repo: PgSalesRepository, config: SalesConfig) -> Router {
    catalog_router_generic(SalesAppState::new(repo, config))
}

/// Customer purchase routes with PostgreSQL repository
pub fn purchases_router(repo: PgSalesRepository, config: SalesConfig) -> Router {
    purchases_router_generic(SalesAppState::new(repo, config))
}

/// Manager sales and product routes with PostgreSQL repository
pub fn manager_router(repo: PgSalesRepository, config: SalesConfig) -> Router {
    manager_router_generic(SalesAppState::new(repo, config))
}

pub fn catalog_router_generic<R>(state: SalesAppState<R>) -> Router
where
    R: SalesRepository,
{
    Router::new()
        .route("/products", get(handlers::list_products::<R>))
        .with_state(state)
}

/// Needs `Extension<CustomerId>`
pub fn purchases_router_generic<R>(state: SalesAppState<R>) -> Router
where
    R: SalesRepository,
{
    Router::new()
        .route(
            "/purchases",
            get(handlers::list_purchases::<R>).post(handlers::make_purchase::<R>),
        )
        .with_state(state)
}

/// Needs `Extension<ManagerId>`
pub fn manager_router_generic<R>(state: SalesAppState<R>) -> Router
where
    R: SalesRepository,
{
    Router::new()
        .route(
            "/sales",
            get(handlers::sales_total::<R>).post(handlers::make_sale::<R>),
        )
        .route("/sales/{id}", get(handlers::get_sale::<R>))
        .route("/products", post(handlers::save_product::<R>))
        .with_state(state)
}
