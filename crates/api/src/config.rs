//! Environment-driven server configuration.

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token signing key is mandatory; starting without one would make
    /// every issued token unverifiable after a restart with a random key.
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingJwtSecret,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl Config {
    /// Read configuration from the environment, failing fast when the
    /// signing key is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            jwt_secret,
            bind_addr,
        })
    }
}
