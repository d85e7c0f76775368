use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::dto::{RecommendationRequest, RecommendationsPayload};
use crate::{
    errors::{ApiJson, AppError, Envelope},
    state::AppState,
};

pub fn recommend_routes() -> Router<AppState> {
    Router::new().route("/recommendations", post(recommendations))
}

#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RecommendationRequest>,
) -> Result<Json<Envelope<RecommendationsPayload>>, AppError> {
    let recommendations = state.recommender.recommend(&req).await?;
    Ok(Envelope::ok(RecommendationsPayload { recommendations }))
}
