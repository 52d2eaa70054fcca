use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    config::{AppConfig, Env},
    error::ApiError,
};

/// Role
///
/// The caller's privilege level, used for coarse-grained route authorization.
/// ADMIN implicitly includes USER: every read route accepts either role,
/// write routes additionally require `Role::Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Claims
///
/// The payload structure expected inside a JSON Web Token issued by the
/// external auth provider. The role travels inside the token, signed with
/// the shared secret, so no database lookup is needed per request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): opaque user identifier assigned by the auth provider.
    pub sub: String,
    /// The caller's role at token-issue time.
    pub role: Role,
    /// Expiration time (exp): validated on every request.
    pub exp: usize,
    /// Issued at (iat).
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. Handlers take this as
/// an argument; the extractor below rejects the request with 403 before the
/// handler body runs if no valid identity can be resolved.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub role: Role,
}

impl AuthUser {
    /// Short-circuit check used at the top of every admin-only handler.
    /// Either role may read; only ADMIN may write.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any protected handler. This keeps authentication
/// (extractor) cleanly separated from the handler bodies.
///
/// Resolution order:
/// 1. Local bypass: in `Env::Local` only, the `x-user-id` and `x-user-role`
///    headers resolve directly to an identity. Used by tests and local
///    development.
/// 2. Bearer token: standard `Authorization: Bearer <jwt>` extraction and
///    validation against the configured secret, with expiry checking.
///
/// Rejection: 403 Forbidden on any failure. An unauthenticated caller and an
/// under-privileged caller are indistinguishable to this API.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        // 1. Local development bypass. Guarded by the Env check so the
        // headers are inert in production.
        if config.env == Env::Local {
            if let Some(role_header) = parts.headers.get("x-user-role") {
                let role = match role_header.to_str() {
                    Ok("admin") => Some(Role::Admin),
                    Ok("user") => Some(Role::User),
                    _ => None,
                };
                if let Some(role) = role {
                    let id = parts
                        .headers
                        .get("x-user-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("local-dev")
                        .to_string();
                    return Ok(AuthUser { id, role });
                }
            }
        }
        // If the bypass did not apply, fall through to standard JWT validation.

        // 2. Token extraction from the Authorization header.
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Forbidden)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Forbidden)?;

        // 3. Decode and validate. The default validation checks the
        // signature and the exp claim; any failure rejects the request.
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(|_| ApiError::Forbidden)?;

        Ok(AuthUser {
            id: token_data.claims.sub,
            role: token_data.claims.role,
        })
    }
}
