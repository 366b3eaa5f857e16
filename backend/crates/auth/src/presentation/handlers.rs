//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::id::CustomerId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CustomerLoginUseCase, LoginInput, ManageCustomersUseCase, ManagerLoginUseCase,
    RegisterCustomerInput, RegisterCustomerUseCase, RegisterManagerInput, RegisterManagerUseCase,
    TokenValidator, UpdateCustomerInput,
};
use crate::domain::repository::AuthRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CustomerResponse, LoginRequest, RegisterCustomerRequest, RegisterManagerRequest,
    TokenResponse, UpdateCustomerRequest, ValidateTokenRequest, ValidateTokenResponse,
};

/// Shared state for auth handlers and guards
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: AuthRepository,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    pub fn validator(&self) -> TokenValidator<R, R, R> {
        TokenValidator::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
    }

    fn customers(&self) -> ManageCustomersUseCase<R> {
        ManageCustomersUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Customer registration and tokens (public)
// ============================================================================

/// POST /api/customers
pub async fn register_customer<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterCustomerRequest>,
) -> AuthResult<Json<CustomerResponse>>
where
    R: AuthRepository,
{
    let use_case = RegisterCustomerUseCase::new(state.repo.clone(), state.config.clone());

    let customer = use_case
        .execute(RegisterCustomerInput {
            name: req.name,
            phone: req.phone,
            password: req.password,
        })
        .await?;

    Ok(Json(customer.into()))
}

/// POST /api/customers/token
pub async fn customer_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AuthRepository,
{
    let use_case =
        CustomerLoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let token = use_case
        .execute(LoginInput {
            phone: req.phone,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: token.into_string(),
    }))
}

/// POST /api/customers/token/validate
///
/// Unknown token is 404 `not found`, expired is 400 `expired`.
pub async fn validate_customer_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ValidateTokenRequest>,
) -> AuthResult<Response>
where
    R: AuthRepository,
{
    let outcome = state.validator().resolve_customer(&req.token).await;

    let (status, body) = match outcome {
        Ok(customer_id) => (StatusCode::OK, ValidateTokenResponse::ok(customer_id)),
        Err(AuthError::TokenNotFound | AuthError::InvalidToken) => (
            StatusCode::NOT_FOUND,
            ValidateTokenResponse::fail("not found"),
        ),
        Err(AuthError::TokenExpired) => (
            StatusCode::BAD_REQUEST,
            ValidateTokenResponse::fail("expired"),
        ),
        Err(AuthError::AccountBlocked) => {
            (StatusCode::FORBIDDEN, ValidateTokenResponse::fail("blocked"))
        }
        Err(e) => return Err(e),
    };

    Ok((status, Json(body)).into_response())
}

// ============================================================================
// Customer management (manager guard)
// ============================================================================

/// GET /api/customers
pub async fn list_customers<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<CustomerResponse>>>
where
    R: AuthRepository,
{
    let customers = state.customers().list_all().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// GET /api/customers/active
pub async fn list_active_customers<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<CustomerResponse>>>
where
    R: AuthRepository,
{
    let customers = state.customers().list_active().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// GET /api/customers/{id}
pub async fn get_customer<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
) -> AuthResult<Json<CustomerResponse>>
where
    R: AuthRepository,
{
    let customer = state.customers().get(CustomerId::new(id)).await?;
    Ok(Json(customer.into()))
}

/// PUT /api/customers/{id}
pub async fn update_customer<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCustomerRequest>,
) -> AuthResult<Json<CustomerResponse>>
where
    R: AuthRepository,
{
    let customer = state
        .customers()
        .update(
            CustomerId::new(id),
            UpdateCustomerInput {
                name: req.name,
                phone: req.phone,
                password: req.password,
            },
        )
        .await?;
    Ok(Json(customer.into()))
}

/// DELETE /api/customers/{id}
pub async fn remove_customer<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
) -> AuthResult<Json<CustomerResponse>>
where
    R: AuthRepository,
{
    let customer = state.customers().remove(CustomerId::new(id)).await?;
    Ok(Json(customer.into()))
}

/// POST /api/customers/{id}/block
pub async fn block_customer<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
) -> AuthResult<Json<CustomerResponse>>
where
    R: AuthRepository,
{
    let customer = state.customers().block(CustomerId::new(id)).await?;
    Ok(Json(customer.into()))
}

/// DELETE /api/customers/{id}/block
pub async fn unblock_customer<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
) -> AuthResult<Json<CustomerResponse>>
where
    R: AuthRepository,
{
    let customer = state.customers().unblock(CustomerId::new(id)).await?;
    Ok(Json(customer.into()))
}

// ============================================================================
// Managers
// ============================================================================

/// POST /api/managers (admin guard)
pub async fn register_manager<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterManagerRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AuthRepository,
{
    let use_case =
        RegisterManagerUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterManagerInput {
            name: req.name,
            phone: req.phone,
            password: req.password,
            roles: req.roles,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token.into_string(),
    }))
}

/// POST /api/managers/token
pub async fn manager_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AuthRepository,
{
    let use_case =
        ManagerLoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let token = use_case
        .execute(LoginInput {
            phone: req.phone,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: token.into_string(),
    }))
}
