pub mod art;
pub mod dto;
pub mod handlers;
pub mod parse;
pub mod pipeline;
pub mod prompt;

pub use pipeline::Recommender;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::recommend_routes()
}
