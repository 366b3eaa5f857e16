//! Auth Guards
//!
//! Route layers that resolve the `Authorization` header and put the owner id
//! into request extensions (`Extension<CustomerId>` / `Extension<ManagerId>`).
//!
//! ```ignore
//! router.route_layer(axum::middleware::from_fn_with_state(
//!     state.clone(),
//!     require_manager::<PgAuthRepository>,
//! ))
//! ```

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::AuthRepository;
use crate::domain::value_object::role::AccessLevel;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthAppState;

/// Token from `Authorization: <token>` or `Authorization: Bearer <token>`
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Requires a live customer token of an unblocked customer
pub async fn require_customer<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> AuthResult<Response>
where
    R: AuthRepository,
{
    let token = extract_token(req.headers()).ok_or(AuthError::MissingToken)?;
    let customer_id = state.validator().resolve_customer(token).await?;

    req.extensions_mut().insert(customer_id);
    Ok(next.run(req).await)
}

/// Requires a live manager token with `MANAGER`
pub async fn require_manager<R>(
    State(state): State<AuthAppState<R>>,
    req: Request,
    next: Next,
) -> AuthResult<Response>
where
    R: AuthRepository,
{
    guard_manager(state, AccessLevel::Manager, req, next).await
}

/// Requires a live manager token with `MANAGER` and `ADMIN`
pub async fn require_admin<R>(
    State(state): State<AuthAppState<R>>,
    req: Request,
    next: Next,
) -> AuthResult<Response>
where
    R: AuthRepository,
{
    guard_manager(state, AccessLevel::Admin, req, next).await
}

async fn guard_manager<R>(
    state: AuthAppState<R>,
    level: AccessLevel,
    mut req: Request,
    next: Next,
) -> AuthResult<Response>
where
    R: AuthRepository,
{
    let token = extract_token(req.headers()).ok_or(AuthError::MissingToken)?;
    let manager_id = state.validator().resolve_manager(token, level).await?;

    tracing::debug!(manager_id = %manager_id, ?level, "Manager authorized");

    req.extensions_mut().insert(manager_id);
    Ok(next.run(req).await)
}
