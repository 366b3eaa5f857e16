//! Wire Error
//!
//! Every failed response body has the shape
//! `{status: "fail", reason, code, title, action?}`. Crate errors build an
//! [`AppError`] in `to_app_error` and render it through `IntoResponse`.

use std::borrow::Cow;
use std::fmt;

use super::kind::ErrorKind;

/// Client-facing error: a kind, a `reason` and an optional hint.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Unauthorized, "token expired")
///     .with_action("Request a new token");
/// assert_eq!(err.status_code(), 401);
/// ```
#[derive(Debug, Clone)]
pub struct AppError {
    kind: ErrorKind,
    reason: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.reason
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.reason)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::json!({
            "status": "fail",
            "reason": self.reason,
            "code": self.kind,
            "title": self.kind.as_str(),
        });
        if let Some(action) = self.action {
            body["action"] = serde_json::Value::from(action.into_owned());
        }

        (status, Json(body)).into_response()
    }
}
