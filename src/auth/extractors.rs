use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::{claims::Claims, gate::Principal};
use crate::errors::AppError;

/// Authenticated principal; rejects with `Unauthenticated` otherwise.
pub struct AuthUser(pub Claims);

/// Principal for routes where authentication is optional.
pub struct MaybeUser(pub Option<Claims>);

fn principal_claims(parts: &Parts) -> Option<Claims> {
    match parts.extensions.get::<Principal>() {
        Some(Principal::User(claims)) => Some(claims.clone()),
        _ => None,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal_claims(parts)
            .map(AuthUser)
            .ok_or(AppError::Unauthenticated)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(principal_claims(parts)))
    }
}
