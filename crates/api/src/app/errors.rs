//! Consistent JSON error responses.
//!
//! Every handler failure funnels through these helpers so the taxonomy →
//! status mapping lives in one place and no internal detail crosses the
//! boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use shopcore_core::ValidationErrors;
use shopcore_infra::{StoreError, UpdateError};

use crate::authz::RoleError;

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn unauthorized() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

pub fn forbidden() -> Response {
    json_error(StatusCode::FORBIDDEN, "Forbidden")
}

pub fn internal() -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// 400 with per-field detail.
pub fn validation_failed(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "Validation failed",
            "errors": errors.errors(),
        })),
    )
        .into_response()
}

pub fn role_error_to_response(err: RoleError) -> Response {
    match err {
        RoleError::MissingIdentity => unauthorized(),
        RoleError::WrongRole => forbidden(),
    }
}

/// Map store failures for `entity` ("Product", "Order", ...) to responses.
pub fn store_error_to_response(err: StoreError, entity: &str) -> Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, format!("{entity} not found")),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
        StoreError::InsufficientStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "Insufficient stock")
        }
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "storage backend failure");
            internal()
        }
    }
}

pub fn update_error_to_response(err: UpdateError, entity: &str) -> Response {
    match err {
        UpdateError::Store(e) => store_error_to_response(e, entity),
        UpdateError::Validation(e) => validation_failed(&e),
    }
}
