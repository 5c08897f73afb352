//! User records and registration input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcore_core::{UserId, ValidationErrors};

use crate::Role;

/// A registered account.
///
/// `email` is unique (enforced by the user store) and lowercased at
/// registration. The record is never mutated by this core after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user record from validated registration input.
    ///
    /// The email is case-normalized here so every store lookup can assume
    /// lowercase.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: &str,
        password_hash: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.trim().to_lowercase(),
            password_hash: password_hash.into(),
            role,
            created_at: now,
        }
    }
}

/// Raw registration input, before hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Shape checks for registration. Every failed check is reported.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "must not be empty");
        }
        if self.email.trim().is_empty() {
            errors.push("email", "must not be empty");
        } else if !self.email.contains('@') {
            errors.push("email", "must be a valid email address");
        }
        if self.password.is_empty() {
            errors.push("password", "must not be empty");
        }
        errors.into_result()
    }
}
