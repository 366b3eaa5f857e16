//! Auth Routers
//!
//! `customers_*` is nested at `/api/customers`, `managers_*` at `/api/managers`.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_manager};

/// Customer routes with PostgreSQL repository
pub fn customers_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    customers_router_generic(AuthAppState::new(repo, config))
}

/// Manager routes with PostgreSQL repository
pub fn managers_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    managers_router_generic(AuthAppState::new(repo, config))
}

/// Customer routes for any repository implementation.
///
/// Registration and tokens are public; the lifecycle routes need a manager.
pub fn customers_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: AuthRepository,
{
    let public = Router::new()
        .route("/", post(handlers::register_customer::<R>))
        .route("/token", post(handlers::customer_token::<R>))
        .route("/token/validate", post(handlers::validate_customer_token::<R>));

    let managed = Router::new()
        .route("/", get(handlers::list_customers::<R>))
        .route("/active", get(handlers::list_active_customers::<R>))
        .route(
            "/{id}",
            get(handlers::get_customer::<R>)
                .put(handlers::update_customer::<R>)
                .delete(handlers::remove_customer::<R>),
        )
        .route(
            "/{id}/block",
            post(handlers::block_customer::<R>).delete(handlers::unblock_customer::<R>),
        )
        .route_layer(from_fn_with_state(state.clone(), require_manager::<R>));

    public.merge(managed).with_state(state)
}

/// Manager routes for any repository implementation
pub fn managers_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: AuthRepository,
{
    let admin = Router::new()
        .route("/", post(handlers::register_manager::<R>))
        .route_layer(from_fn_with_state(state.clone(), require_admin::<R>));

    Router::new()
        .route("/token", post(handlers::manager_token::<R>))
        .merge(admin)
        .with_state(state)
}
