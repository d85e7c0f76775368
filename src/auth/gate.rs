//! Request authentication gate.
//!
//! Runs on every request. A present token is always verified, whatever the
//! path; only a missing token is judged against the protected namespace.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use time::OffsetDateTime;
use tracing::warn;

use super::{claims::Claims, jwt::JwtKeys};
use crate::errors::AppError;

pub const PROTECTED_PREFIX: &str = "/api/protected";

/// Identity attached to a request after the gate has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(Claims),
}

pub fn is_protected(path: &str) -> bool {
    path == PROTECTED_PREFIX
        || path
            .strip_prefix(PROTECTED_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Second whitespace-separated part of the header (`Bearer <token>`), if any.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

pub fn classify(
    token: Option<&str>,
    path: &str,
    keys: &JwtKeys,
    now: OffsetDateTime,
) -> Result<Principal, AppError> {
    match token {
        None if is_protected(path) => Err(AppError::Unauthenticated),
        None => Ok(Principal::Anonymous),
        Some(token) => keys
            .verify_at(token, now)
            .map(Principal::User)
            .map_err(|e| {
                warn!(error = %e, %path, "rejecting request with invalid token");
                AppError::InvalidToken
            }),
    }
}

pub async fn authenticate(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    let principal = classify(token, req.uri().path(), &keys, OffsetDateTime::now_utc())?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
