use axum::Router;

pub mod auth;
pub mod orders;
pub mod products;
pub mod system;

/// Router for the versioned API surface (everything the gatekeeper fronts).
pub fn router() -> Router {
    Router::new()
        .nest("/api/v1/auth", auth::router())
        .nest("/api/v1/products", products::router())
        .nest("/api/v1/orders", orders::router())
}
