use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthPayload, CurrentUserPayload, LoginRequest, PublicUser, RegisterRequest},
        extractors::MaybeUser,
        password::{hash_password, verify_password},
        repo::DuplicateUser,
        services::{is_valid_email, normalize_email, validate_registration},
    },
    errors::{ApiJson, AppError, Envelope},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/user", get(current_user))
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<AuthPayload>>), AppError> {
    validate_registration(&mut payload)?;

    if let Some(existing) = state
        .users
        .find_by_email_or_username(&payload.email, &payload.username)
        .await?
    {
        let dup = if existing.email == payload.email {
            DuplicateUser::Email
        } else {
            DuplicateUser::Username
        };
        warn!(username = %payload.username, email = %payload.email, "duplicate registration");
        return Err(AppError::Validation(dup.to_string()));
    }

    let hash = hash_password(&payload.password)?;
    let user = state
        .users
        .create(&payload.username, &payload.email, &hash)
        .await
        .map_err(|e| match e.downcast_ref::<DuplicateUser>() {
            Some(dup) => AppError::Validation(dup.to_string()),
            None => AppError::Internal(e),
        })?;

    let token = state.jwt.issue(user.id, &user.username)?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Envelope::ok(AuthPayload {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<Envelope<AuthPayload>>, AppError> {
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(%email, "login with invalid email");
        return Err(AppError::Validation(INVALID_CREDENTIALS.into()));
    }

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(%email, "login unknown email");
        return Err(AppError::Validation(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(AppError::Validation(INVALID_CREDENTIALS.into()));
    }

    let token = state.jwt.issue(user.id, &user.username)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Envelope::ok(AuthPayload {
        token,
        user: user.into(),
    }))
}

/// Anonymous callers get `{success: false, isAuthenticated: false}` with 200.
#[instrument(skip(state, principal))]
pub async fn current_user(
    State(state): State<AppState>,
    principal: MaybeUser,
) -> Result<Json<Envelope<CurrentUserPayload>>, AppError> {
    let Some(claims) = principal.0 else {
        return Ok(Json(Envelope {
            success: false,
            data: CurrentUserPayload {
                is_authenticated: false,
                user: None,
            },
        }));
    };

    let user = state
        .users
        .find_by_id(claims.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;

    Ok(Envelope::ok(CurrentUserPayload {
        is_authenticated: true,
        user: Some(PublicUser::from(user)),
    }))
}
