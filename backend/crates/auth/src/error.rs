//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No customer with the requested id
    #[error("customer not found")]
    CustomerNotFound,

    /// Login phone is not registered
    #[error("no such user")]
    NoSuchUser,

    /// Login password does not match
    #[error("invalid password")]
    InvalidPassword,

    /// Token is not shaped like an issued token
    #[error("invalid token")]
    InvalidToken,

    /// Well-formed token with no matching record
    #[error("token not found")]
    TokenNotFound,

    /// Token is older than the validity window
    #[error("token expired")]
    TokenExpired,

    /// No `Authorization` header on a guarded route
    #[error("missing token")]
    MissingToken,

    /// Manager lacks a required role
    #[error("no permissions")]
    NoPermissions,

    /// Customer is blocked
    #[error("account blocked")]
    AccountBlocked,

    /// Phone already registered
    #[error("phone already registered")]
    PhoneTaken,

    /// Customer still referenced by recorded sales
    #[error("customer has recorded sales")]
    CustomerInUse,

    /// Malformed request field
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Password rejected by policy
    #[error("password validation failed: {0}")]
    PasswordValidation(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::CustomerNotFound => ErrorKind::NotFound,
            AuthError::NoSuchUser
            | AuthError::InvalidPassword
            | AuthError::InvalidToken
            | AuthError::TokenNotFound
            | AuthError::TokenExpired
            | AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::NoPermissions | AuthError::AccountBlocked => ErrorKind::Forbidden,
            AuthError::PhoneTaken | AuthError::CustomerInUse => ErrorKind::Conflict,
            AuthError::InvalidInput(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                ErrorKind::ServiceUnavailable
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        let err = match self {
            AuthError::Database(_) => AppError::new(self.kind(), "database error"),
            AuthError::Internal(_) => AppError::new(self.kind(), "internal error"),
            _ => AppError::new(self.kind(), self.to_string()),
        };
        match self {
            AuthError::TokenExpired | AuthError::TokenNotFound => {
                err.with_action("Request a new token")
            }
            AuthError::MissingToken => err.with_action("Send the token in the Authorization header"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidPassword => {
                tracing::warn!("Login attempt with wrong password");
            }
            AuthError::AccountBlocked => {
                tracing::warn!("Blocked customer attempted access");
            }
            AuthError::NoPermissions => {
                tracing::warn!("Manager lacks required role");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
