//! Bearer token extractors

use std::sync::Arc;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use crate::domain::User;
use crate::{Error, Result};
use super::AppState;

/// The signed-in user; rejects the request with `Unauthorized` otherwise
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// The signed-in user if the request carries a valid token
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self> {
        let token = bearer_token(parts).ok_or(Error::Unauthorized)?;
        let user = state.service.authenticate(token, chrono::Utc::now().timestamp()).await?;
        Ok(AuthUser(user))
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };
        match state.service.authenticate(token, chrono::Utc::now().timestamp()).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(Error::Unauthorized | Error::UserNotFound(_)) => Ok(MaybeUser(None)),
            Err(e) => Err(e),
        }
    }
}
