use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{FeedbackRequest, HistoryPayload, MessagePayload, SavedPayload, UpdatedPayload},
    repo_types::NewHistoryEntry,
    services,
};
use crate::{
    auth::extractors::{AuthUser, MaybeUser},
    errors::{ApiJson, AppError, Envelope},
    state::AppState,
};

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/protected/history", get(list_history).post(save_history))
        .route("/protected/history/:id", delete(delete_history))
        .route("/protected/history/:id/feedback", put(update_feedback))
}

/// Pre-`/protected` path kept for older clients.
pub fn legacy_routes() -> Router<AppState> {
    Router::new().route("/history", get(legacy_history))
}

/// Ids that are not UUIDs cannot name an entry.
fn parse_entry_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Song not found".into()))
}

#[instrument(skip(state, user, body))]
pub async fn save_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(body): ApiJson<NewHistoryEntry>,
) -> Result<Json<Envelope<SavedPayload>>, AppError> {
    let history = services::append(state.history.as_ref(), user.id, &body).await?;
    Ok(Envelope::ok(SavedPayload { history }))
}

#[instrument(skip(state, user))]
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Envelope<HistoryPayload>>, AppError> {
    let history = services::list(state.history.as_ref(), user.id).await?;
    Ok(Envelope::ok(HistoryPayload { history }))
}

#[instrument(skip(state, user, body))]
pub async fn update_feedback(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<FeedbackRequest>,
) -> Result<Json<Envelope<UpdatedPayload>>, AppError> {
    let entry_id = parse_entry_id(&id)?;
    let feedback = body.parse()?;
    let updated =
        services::set_feedback(state.history.as_ref(), entry_id, feedback, user.id).await?;
    Ok(Envelope::ok(UpdatedPayload { updated }))
}

#[instrument(skip(state, user))]
pub async fn delete_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<MessagePayload>>, AppError> {
    let entry_id = parse_entry_id(&id)?;
    services::remove(state.history.as_ref(), entry_id, user.id).await?;
    Ok(Envelope::ok(MessagePayload {
        message: "Song deleted successfully",
    }))
}

/// Own history when signed in, an empty list for guests.
#[instrument(skip(state, principal))]
pub async fn legacy_history(
    State(state): State<AppState>,
    principal: MaybeUser,
) -> Result<Json<Envelope<HistoryPayload>>, AppError> {
    let history = match principal.0 {
        Some(user) => services::list(state.history.as_ref(), user.id).await?,
        None => Vec::new(),
    };
    Ok(Envelope::ok(HistoryPayload { history }))
}
