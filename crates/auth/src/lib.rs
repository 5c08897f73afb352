//! `shopcore-auth` — authentication/authorization boundary.
//!
//! Tokens, roles, user records, and password hashing. This crate is
//! intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod password;
pub mod roles;
pub mod token;
pub mod user;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::{PasswordError, hash_password, verify_password};
pub use roles::Role;
pub use token::{Hs256TokenService, IssueError, JwtValidator, TOKEN_TTL_HOURS, VerificationError};
pub use user::{NewUser, User};
