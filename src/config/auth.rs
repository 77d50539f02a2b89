//! Authentication configuration.

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Access token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret for access tokens.
    pub jwt_secret: String,

    /// Access token lifetime in minutes.
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
}

fn default_access_token_minutes() -> i64 {
    30
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < 32 {
            return Err(ValidationError::invalid(
                "auth.jwt_secret",
                "must be at least 32 characters in production",
            ));
        }
        if self.access_token_minutes <= 0 {
            return Err(ValidationError::invalid(
                "auth.access_token_minutes",
                "must be positive",
            ));
        }
        Ok(())
    }
}
