//! Handler-level role guard.
//!
//! Enforced after the gatekeeper has attached identity; handlers bail out on
//! any error here before touching persistence.

use thiserror::Error;

use shopcore_auth::Role;

use crate::context::AuthContext;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoleError {
    /// No identity on the request. Unreachable when the gatekeeper is wired
    /// in front of the route; kept as a guard against misconfiguration.
    #[error("no authenticated identity on request")]
    MissingIdentity,

    #[error("caller role does not match required role")]
    WrongRole,
}

/// Require the caller to hold exactly `expected`.
///
/// Exact match only: `Admin` does not satisfy a `User` requirement or vice
/// versa. Returns the context so handlers can read the caller id.
pub fn require_role(ctx: Option<&AuthContext>, expected: Role) -> Result<&AuthContext, RoleError> {
    let ctx = ctx.ok_or(RoleError::MissingIdentity)?;
    if ctx.role() != expected {
        return Err(RoleError::WrongRole);
    }
    Ok(ctx)
}
