//! Authentication Middleware
//!
//! Bearer JWT verification. Tokens are issued elsewhere; this service only
//! checks the signature and expiry and trusts `sub` as the user id.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Authenticated user extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Verify a bearer token and return the user it was issued for.
pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::NotAuthenticated("Token expired".into()),
        _ => AppError::NotAuthenticated("Invalid token".into()),
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::NotAuthenticated("Invalid token claims".into()))?;

    Ok(AuthUser { user_id })
}

/// Resolve the caller from the `Authorization` header.
///
/// Requests without the header continue anonymously. A header that is
/// present but does not carry a valid bearer token is rejected with 401,
/// whatever the route.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::NotAuthenticated("Invalid authorization header format".into())
        })?;

    let user = verify_token(token, &state.settings.jwt.secret)?;
    tracing::debug!(user_id = user.user_id, "Request authenticated");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
