//! Recommendation enrichment pipeline.
//!
//! One completion call (fatal on failure), then at most `SONG_COUNT`
//! candidates are enriched concurrently. A candidate whose video lookup
//! fails is dropped; art lookup never drops a candidate.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::{
    art::resolve_cover_art,
    dto::{Recommendation, RecommendationRequest},
    parse::{parse_candidates, Candidate},
    prompt::{build_prompt, SONG_COUNT},
};
use crate::{
    clients::{youtube::watch_url, ArtLookup, CompletionClient, LookupError, VideoSearch},
    errors::AppError,
};

/// Why a single candidate was left out of the result.
#[derive(Debug, Error)]
pub enum LookupFailed {
    #[error("video lookup for '{query}' failed: {source}")]
    Video {
        query: String,
        #[source]
        source: LookupError,
    },
    #[error("no video found for '{query}'")]
    NoVideo { query: String },
}

pub struct Recommender {
    llm: Arc<dyn CompletionClient>,
    videos: Arc<dyn VideoSearch>,
    art: Option<Arc<dyn ArtLookup>>,
}

impl Recommender {
    pub fn new(
        llm: Arc<dyn CompletionClient>,
        videos: Arc<dyn VideoSearch>,
        art: Option<Arc<dyn ArtLookup>>,
    ) -> Self {
        Self { llm, videos, art }
    }

    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        req: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, AppError> {
        let prompt = build_prompt(&req.mood, &req.language, &req.genre);
        let completion = self
            .llm
            .complete(&prompt)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let mut candidates = parse_candidates(&completion);
        let parsed = candidates.len();
        candidates.truncate(SONG_COUNT);

        let results = join_all(candidates.into_iter().map(|c| self.enrich(c))).await;
        let recommendations: Vec<Recommendation> = results
            .into_iter()
            .filter_map(|r| match r {
                Ok(rec) => Some(rec),
                Err(e) => {
                    warn!(error = %e, "dropping candidate");
                    None
                }
            })
            .collect();

        info!(parsed, returned = recommendations.len(), "recommendations ready");
        Ok(recommendations)
    }

    async fn enrich(&self, candidate: Candidate) -> Result<Recommendation, LookupFailed> {
        let (link, image_url) = tokio::join!(self.video_link(&candidate), self.cover_art(&candidate));
        Ok(Recommendation {
            song_title: candidate.title,
            artist: candidate.artist,
            youtube_link: link?,
            image_url,
        })
    }

    async fn video_link(&self, candidate: &Candidate) -> Result<String, LookupFailed> {
        let query = &candidate.line;
        match self.videos.first_video_id(query).await {
            Ok(Some(id)) => Ok(watch_url(&id)),
            Ok(None) => Err(LookupFailed::NoVideo {
                query: query.clone(),
            }),
            Err(source) => Err(LookupFailed::Video {
                query: query.clone(),
                source,
            }),
        }
    }

    async fn cover_art(&self, candidate: &Candidate) -> Option<String> {
        let art = self.art.as_deref()?;
        Some(resolve_cover_art(art, &candidate.artist, &candidate.title).await)
    }
}
