//! Outbound API seams. The pipeline only sees these traits; the concrete
//! HTTP clients are built once at startup and share one `reqwest::Client`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub mod lastfm;
pub mod mistral;
pub mod youtube;

pub use lastfm::LastFmClient;
pub use mistral::MistralClient;
pub use youtube::YoutubeSearch;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup returned status {0}")]
    Status(u16),
}

/// Text completion for a single user prompt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Free-text video search; `Ok(None)` means no results.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn first_video_id(&self, query: &str) -> Result<Option<String>, LookupError>;
}

/// One size variant of a cover image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtImage {
    #[serde(rename = "#text", default)]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

/// Album and artist artwork lookup.
#[async_trait]
pub trait ArtLookup: Send + Sync {
    async fn track_images(&self, artist: &str, track: &str) -> Result<Vec<ArtImage>, LookupError>;
    async fn artist_images(&self, artist: &str) -> Result<Vec<ArtImage>, LookupError>;
}
