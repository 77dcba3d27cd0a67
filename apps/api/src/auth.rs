//! Bearer / cookie token authentication.

use std::fmt;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

pub const AUTH_COOKIE: &str = "auth-token";

const MISSING_TOKEN: &str = "Authentication required";
const INVALID_TOKEN: &str = "Invalid token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub exp: i64,
}

/// HS256 token verifier keyed by `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtVerifier").finish_non_exhaustive()
    }
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let decoded = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("Token rejected: expired"),
                ErrorKind::InvalidSignature => {
                    tracing::error!("Security alert: invalid token signature")
                }
                kind => tracing::warn!("Token rejected: {kind:?}"),
            }
            AppError::Unauthorized(INVALID_TOKEN.to_string())
        })?;
        Ok(decoded.claims)
    }
}

/// Token from `Authorization: Bearer …`, else from the `auth-token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == AUTH_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The caller behind a verified token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized(MISSING_TOKEN.to_string()))?;
        let claims = state.jwt.verify(&token)?;
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Signs a token the way the auth service does. Test-only.
#[cfg(test)]
pub fn issue_test_token(secret: &str, sub: &str, ttl_seconds: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: sub.to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_seconds,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
