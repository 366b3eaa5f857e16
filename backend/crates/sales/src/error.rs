//! Sales Error Types
//!
//! Catalog, purchase and sale failures, converted to the unified
//! `kernel::error::AppError` body at the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::ProductId;
use thiserror::Error;

/// Sales-specific result type alias
pub type SalesResult<T> = Result<T, SalesError>;

#[derive(Debug, Error)]
pub enum SalesError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("sale not found")]
    SaleNotFound,

    #[error("customer not found")]
    CustomerNotFound,

    /// The requested quantity exceeds stock on hand
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("product is not for sale: {0}")]
    ProductInactive(ProductId),

    #[error("invalid sale: {0}")]
    InvalidSale(String),

    #[error("invalid product: {0}")]
    InvalidProduct(String),

    #[error("invalid purchase: {0}")]
    InvalidPurchase(String),

    /// A line or running total does not fit in `i64` minor units
    #[error("amount out of range")]
    AmountOutOfRange,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SalesError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SalesError::ProductNotFound(_)
            | SalesError::SaleNotFound
            | SalesError::CustomerNotFound => ErrorKind::NotFound,
            SalesError::InsufficientStock { .. }
            | SalesError::ProductInactive(_)
            | SalesError::AmountOutOfRange => ErrorKind::Conflict,
            SalesError::InvalidSale(_)
            | SalesError::InvalidProduct(_)
            | SalesError::InvalidPurchase(_) => ErrorKind::BadRequest,
            SalesError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                ErrorKind::ServiceUnavailable
            }
            SalesError::Database(_) | SalesError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            SalesError::Database(_) => AppError::new(self.kind(), "database error"),
            SalesError::Internal(_) => AppError::new(self.kind(), "internal error"),
            SalesError::InsufficientStock { .. } => AppError::new(self.kind(), self.to_string())
                .with_action("Reduce the quantity or restock the product"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SalesError::Database(e) => {
                tracing::error!(error = %e, "Sales database error");
            }
            SalesError::Internal(msg) => {
                tracing::error!(message = %msg, "Sales internal error");
            }
            SalesError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                tracing::warn!(%product_id, requested, available, "Sale rejected: insufficient stock");
            }
            _ => {
                tracing::debug!(error = %self, "Sales error");
            }
        }
    }
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
