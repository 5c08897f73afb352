//! HS256 token issuance and verification.
//!
//! Verification is stateless: a signature check plus the time-window check in
//! [`crate::claims`]. There is no server-side session store and therefore no
//! revocation; logout is client-side token deletion.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopcore_core::UserId;

use crate::Role;
use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Fixed token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Why a presented token was rejected.
///
/// The HTTP boundary collapses all of these into a uniform 401 so the reason
/// is never leaked to clients; the distinction exists for logs and tests.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is missing identity claims")]
    MissingClaims,
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Wire-format claims.
///
/// `sub` and `role` are optional on the way in so that a structurally valid,
/// correctly signed token lacking identity claims maps to `MissingClaims`
/// rather than `Malformed`.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    iat: i64,
    exp: i64,
}

/// Verification seam consumed by the gatekeeper middleware.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, VerificationError>;
}

/// Symmetric-key token service: issues and verifies HS256 JWTs.
pub struct Hs256TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed, time-bounded credential for `(user_id, role)`.
    ///
    /// The payload carries exactly the subject and role plus `iat`/`exp`;
    /// expiry is fixed at [`TOKEN_TTL_HOURS`] from `now`.
    pub fn issue(
        &self,
        user_id: UserId,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        let expires_at = now + Duration::hours(TOKEN_TTL_HOURS);
        let claims = WireClaims {
            sub: Some(user_id.to_string()),
            role: Some(role),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }
}

impl JwtValidator for Hs256TokenService {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, VerificationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged against the caller-supplied clock below, with no
        // leeway, rather than by the decoder's wall clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data =
            decode::<WireClaims>(token, &self.decoding, &validation).map_err(map_decode_error)?;

        let (sub, role) = match (data.claims.sub, data.claims.role) {
            (Some(sub), Some(role)) => (sub, role),
            _ => return Err(VerificationError::MissingClaims),
        };
        let sub: UserId = sub.parse().map_err(|_| VerificationError::Malformed)?;
        let issued_at =
            DateTime::from_timestamp(data.claims.iat, 0).ok_or(VerificationError::Malformed)?;
        let expires_at =
            DateTime::from_timestamp(data.claims.exp, 0).ok_or(VerificationError::Malformed)?;

        let claims = JwtClaims {
            sub,
            role,
            issued_at,
            expires_at,
        };
        validate_claims(&claims, now).map_err(|e| match e {
            TokenValidationError::Expired => VerificationError::Expired,
            TokenValidationError::NotYetValid | TokenValidationError::InvalidTimeWindow => {
                VerificationError::Malformed
            }
        })?;

        Ok(claims)
    }
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> VerificationError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::InvalidSignature => VerificationError::InvalidSignature,
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        _ => VerificationError::Malformed,
    }
}
