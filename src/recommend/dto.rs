use serde::{Deserialize, Serialize};

/// Free-text preferences, forwarded verbatim into the prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub mood: String,
    pub language: String,
    pub genre: String,
}

/// An enriched candidate; field names match the history save payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub song_title: String,
    pub artist: String,
    pub youtube_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsPayload {
    pub recommendations: Vec<Recommendation>,
}
