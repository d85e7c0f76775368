use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    errors::{AppError, Envelope},
    history::{
        repo_types::{CommunityFilter, HistoryEntry},
        services,
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct CommunityPayload {
    pub songs: Vec<HistoryEntry>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/community", get(community_feed))
}

#[instrument(skip(state))]
pub async fn community_feed(
    State(state): State<AppState>,
    Query(filter): Query<CommunityFilter>,
) -> Result<Json<Envelope<CommunityPayload>>, AppError> {
    let songs = services::community(state.history.as_ref(), filter).await?;
    Ok(Envelope::ok(CommunityPayload { songs }))
}
