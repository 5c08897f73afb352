//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store and token-service wiring
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// The gatekeeper middleware wraps the whole `/api/v1` tree; `/health` sits
/// outside it.
pub fn build_app(jwt_secret: &str) -> Router {
    let tokens = Arc::new(shopcore_auth::Hs256TokenService::new(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState {
        jwt: tokens.clone(),
    };
    let services = Arc::new(services::build_services(tokens));

    let api = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(api)
}
