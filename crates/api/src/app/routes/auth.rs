use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;

use shopcore_auth::{NewUser, PasswordError, Role, User, hash_password, verify_password};
use shopcore_core::UserId;
use shopcore_infra::StoreError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let input = NewUser {
        name: body.name,
        email: body.email,
        password: body.password,
    };
    let mut field_errors = input.validate().err().unwrap_or_default();

    // Source behavior, preserved deliberately: a caller-supplied role is
    // honored verbatim (admin self-registration included); absent role
    // defaults to user.
    let role = match body.role.as_deref() {
        None | Some("") => Role::User,
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                field_errors.push("role", "must be one of: admin, user");
                Role::User
            }
        },
    };

    if let Err(e) = field_errors.into_result() {
        return errors::validation_failed(&e);
    }

    let password_hash = match hash_password(&input.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return errors::internal();
        }
    };

    let user = User::new(
        UserId::new(),
        input.name,
        &input.email,
        password_hash,
        role,
        Utc::now(),
    );
    let user_id = user.id;

    if let Err(e) = services.users.insert(user) {
        return match e {
            StoreError::Conflict(_) => {
                errors::json_error(StatusCode::CONFLICT, "Email already in use")
            }
            other => errors::store_error_to_response(other, "User"),
        };
    }

    tracing::info!(user_id = %user_id, role = %role, "user registered");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully",
        })),
    )
        .into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    if let Err(e) = body.validate() {
        return errors::validation_failed(&e);
    }

    // Lowercase to match registration-time normalization.
    let email = body.email.trim().to_lowercase();

    let user = match services.users.find_by_email(&email) {
        Ok(Some(user)) => user,
        Ok(None) => return invalid_credentials(),
        Err(e) => return errors::store_error_to_response(e, "User"),
    };

    match verify_password(&body.password, &user.password_hash) {
        Ok(()) => {}
        Err(PasswordError::Mismatch) => return invalid_credentials(),
        Err(e) => {
            tracing::error!(error = %e, "password verification failed");
            return errors::internal();
        }
    }

    let token = match services.tokens.issue(user.id, user.role, Utc::now()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return errors::internal();
        }
    };

    tracing::debug!(user_id = %user.id, "login succeeded");

    Json(serde_json::json!({
        "token": token,
        "role": user.role,
    }))
    .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    // Same response whether the email is unknown or the password is wrong.
    errors::json_error(StatusCode::UNAUTHORIZED, "Invalid credentials")
}
