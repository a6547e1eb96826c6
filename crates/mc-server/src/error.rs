//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`mc_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on core and database calls.
//! Response bodies are fixed per error kind: clients never see validation
//! detail or internal messages, those go to the log instead.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: mc_core::Error,
}

impl AppError {
    pub fn new(inner: mc_core::Error) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &mc_core::Error {
        &self.inner
    }

    pub fn into_inner(self) -> mc_core::Error {
        self.inner
    }
}

impl From<mc_core::Error> for AppError {
    fn from(e: mc_core::Error) -> Self {
        Self::new(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(mc_core::Error::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.inner {
            mc_core::Error::NotFound { entity, id } => {
                tracing::debug!(%entity, %id, "Entity not found");
                json!({ "error": format!("{entity} not found") })
            }
            mc_core::Error::Validation(detail) => {
                tracing::debug!(%detail, "Rejected request");
                json!({ "errors": ["validation errors"] })
            }
            _ => {
                tracing::error!(
                    status = %status,
                    error = %self.inner,
                    "Server error in API handler"
                );
                json!({ "error": "internal server error" })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
