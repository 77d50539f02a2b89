//! Authentication extractors for axum.
//!
//! Access tokens are HS256 JWTs carrying the identity fields the engine
//! consumes: subject, role, organization, and the active flag. Extractors
//! resolve a verified [`AuthenticatedUser`] before any handler runs; the
//! core trusts this value as given.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, OrganizationId, Role, Timestamp, UserId,
};

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id.
    pub sub: String,
    pub role: String,
    /// Organization id, if the user belongs to a tenant.
    pub org: Option<String>,
    pub active: bool,
    /// Expiry as Unix seconds.
    pub exp: i64,
}

/// Encodes an access token. Used by the auth service and test fixtures.
pub fn encode_access_token(secret: &str, user: &AuthenticatedUser, ttl_secs: i64) -> String {
    let claims = AccessClaims {
        sub: user.user_id.to_string(),
        role: user.role.as_str().to_string(),
        org: user.organization_id.map(|o| o.to_string()),
        active: user.is_active,
        exp: Timestamp::now().plus_secs(ttl_secs).as_unix_secs(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("JWT encoding with static header cannot fail")
}

fn decode_user(secret: &str, token: &str) -> Result<AuthenticatedUser, DomainError> {
    let unauthorized = || DomainError::new(ErrorCode::Unauthorized, "Invalid access token");

    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| unauthorized())?;

    let claims = data.claims;
    let user_id: UserId = claims.sub.parse().map_err(|_| unauthorized())?;
    let role = Role::parse(&claims.role).ok_or_else(unauthorized)?;
    let organization_id = match claims.org {
        Some(org) => Some(org.parse::<OrganizationId>().map_err(|_| unauthorized())?),
        None => None,
    };

    Ok(AuthenticatedUser {
        user_id,
        role,
        organization_id,
        is_active: claims.active,
    })
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthenticatedUser, ApiError> {
    let token = bearer_token(parts).ok_or_else(|| {
        ApiError(DomainError::new(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))
    })?;
    decode_user(&state.auth_secret, token).map_err(ApiError)
}

/// Extractor requiring any authenticated user.
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequireAuth(authenticate(parts, state).await?))
    }
}

/// Extractor requiring an active student.
pub struct RequireStudent(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;
        if !user.is_student() || !user.is_active {
            return Err(ApiError(DomainError::new(
                ErrorCode::Forbidden,
                "Student access required",
            )));
        }
        Ok(RequireStudent(user))
    }
}

/// Extractor requiring the platform super admin.
pub struct RequireSuperAdmin(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;
        if !user.is_super_admin() {
            return Err(ApiError(DomainError::new(
                ErrorCode::Forbidden,
                "Super admin access required",
            )));
        }
        Ok(RequireSuperAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "auth-secret-test";

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(),
            role,
            organization_id: Some(OrganizationId::new()),
            is_active: true,
        }
    }

    #[test]
    fn token_round_trips_identity() {
        let original = user(Role::Student);
        let token = encode_access_token(SECRET, &original, 3600);

        let decoded = decode_user(SECRET, &token).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = encode_access_token("other-secret", &user(Role::Student), 3600);
        assert!(decode_user(SECRET, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Validation applies default leeway; go well past it
        let token = encode_access_token(SECRET, &user(Role::Student), -3600);
        assert!(decode_user(SECRET, &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(decode_user(SECRET, "not-a-jwt").is_err());
    }
}
