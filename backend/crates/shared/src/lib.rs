//! Shared Kernel
//!
//! Vocabulary that every bounded context agrees on:
//! - the unified wire error ([`error::app_error::AppError`]) and its classification
//! - typed integer ids ([`id::CustomerId`], [`id::ManagerId`], ...)
//!
//! Guards in `auth` put [`id::CustomerId`] / [`id::ManagerId`] into request
//! extensions; `sales` reads them back without depending on `auth`.

pub mod error {
    pub mod app_error;
    pub mod kind;

    pub use app_error::{AppError, AppResult};
    pub use kind::ErrorKind;
}
pub mod id;
