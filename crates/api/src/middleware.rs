//! Gatekeeper middleware: the single chokepoint in front of every API route.
//!
//! Verifies the bearer token (except on the public-route allowlist) and
//! injects the verified identity as an [`AuthContext`] request extension
//! before any handler runs. Handlers never see a protected request without
//! identity attached.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use shopcore_auth::JwtValidator;

use crate::app::errors;
use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Routes that bypass verification entirely.
fn is_public(method: &Method, path: &str) -> bool {
    match (method, path) {
        (&Method::POST, "/api/v1/auth/register" | "/api/v1/auth/login") => true,
        (&Method::GET, "/api/v1/products") => true,
        _ => false,
    }
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<Body>,
    next: Next,
) -> Response {
    if is_public(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(_) => return errors::unauthorized(),
    };

    let claims = match state.jwt.validate(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            // Reason stays in the logs; the response is a uniform 401.
            tracing::debug!(reason = %e, "rejected bearer token");
            return errors::unauthorized();
        }
    };

    req.extensions_mut()
        .insert(AuthContext::new(claims.sub, claims.role));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        assert!(extract_bearer(&headers_with("Basic abc")).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(extract_bearer(&headers_with("Bearer   ")).is_err());
    }

    #[test]
    fn allowlist_matches_exact_method_and_path() {
        assert!(is_public(&Method::POST, "/api/v1/auth/register"));
        assert!(is_public(&Method::POST, "/api/v1/auth/login"));
        assert!(is_public(&Method::GET, "/api/v1/products"));

        assert!(!is_public(&Method::POST, "/api/v1/products"));
        assert!(!is_public(&Method::GET, "/api/v1/orders"));
        assert!(!is_public(&Method::POST, "/api/v1/orders"));
    }
}
