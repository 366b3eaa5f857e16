//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Startup failures are `anyhow` errors; request failures are rendered by
//! the `auth` and `sales` error types.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::application::{BootstrapAdminInput, BootstrapAdminUseCase};
use auth::middleware::{require_customer, require_manager};
use auth::router::{customers_router_generic, managers_router_generic};
use auth::{AuthAppState, AuthConfig, PgAuthRepository};
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
    routing::get,
};
use sales::router::{catalog_router, manager_router, purchases_router};
use sales::{PgSalesRepository, SalesConfig};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse an optional variable, falling back to `default` when it is unset
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        Err(_) => Ok(default),
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let password_pepper = match env::var("PASSWORD_PEPPER") {
        Ok(b64) => Some(
            platform::crypto::from_base64(&b64).context("PASSWORD_PEPPER must be base64")?,
        ),
        Err(_) => None,
    };

    Ok(AuthConfig {
        token_ttl: Duration::from_secs(env_or("TOKEN_TTL_SECS", 3600u64)?),
        password_pepper,
        ..AuthConfig::default()
    })
}

fn sales_config() -> anyhow::Result<SalesConfig> {
    Ok(SalesConfig {
        product_list_limit: env_or("PRODUCT_LIST_LIMIT", 500i64)?,
        ..SalesConfig::default()
    })
}

/// Create the first admin when BOOTSTRAP_ADMIN_PHONE and
/// BOOTSTRAP_ADMIN_PASSWORD are both set
async fn bootstrap_admin(store: &PgAuthRepository, config: &AuthConfig) -> anyhow::Result<()> {
    let (Ok(phone), Ok(password)) = (
        env::var("BOOTSTRAP_ADMIN_PHONE"),
        env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };
    let name = env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

    let use_case = BootstrapAdminUseCase::new(Arc::new(store.clone()), Arc::new(config.clone()));
    match use_case
        .execute(BootstrapAdminInput {
            name,
            phone,
            password,
        })
        .await?
    {
        Some(manager_id) => tracing::info!(manager_id = %manager_id, "Bootstrap admin created"),
        None => tracing::info!("Bootstrap admin already present"),
    }

    Ok(())
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,sales=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(env_or("DATABASE_MAX_CONNECTIONS", 5u32)?)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = auth_config()?;
    let sales_config = sales_config()?;
    tracing::info!(
        token_ttl_secs = auth_config.token_ttl.as_secs(),
        pepper = auth_config.password_pepper.is_some(),
        product_list_limit = sales_config.product_list_limit,
        "Configuration loaded"
    );

    let auth_store = PgAuthRepository::new(pool.clone());
    let sales_store = PgSalesRepository::new(pool.clone());

    bootstrap_admin(&auth_store, &auth_config).await?;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Guards resolve tokens through the auth store and hand typed ids to sales
    let auth_state = AuthAppState::new(auth_store, auth_config);
    let customer_guard =
        from_fn_with_state(auth_state.clone(), require_customer::<PgAuthRepository>);
    let manager_guard = from_fn_with_state(auth_state.clone(), require_manager::<PgAuthRepository>);

    let customers = customers_router_generic(auth_state.clone())
        .merge(catalog_router(sales_store.clone(), sales_config.clone()))
        .merge(purchases_router(sales_store.clone(), sales_config.clone()).route_layer(customer_guard));

    let managers = managers_router_generic(auth_state)
        .merge(manager_router(sales_store, sales_config).route_layer(manager_guard));

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/customers", customers)
        .nest("/api/managers", managers)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env_or("API_PORT", 31113)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
