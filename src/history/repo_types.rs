use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Listener feedback on a saved song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Liked,
    Disliked,
}

#[derive(Debug, Error)]
#[error("feedback must be 'liked' or 'disliked', got '{0}'")]
pub struct UnknownFeedback(pub String);

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Liked => "liked",
            Feedback::Disliked => "disliked",
        }
    }
}

impl FromStr for Feedback {
    type Err = UnknownFeedback;

    /// Accepts the legacy `like`/`dislike` spellings as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liked" | "like" => Ok(Feedback::Liked),
            "disliked" | "dislike" => Ok(Feedback::Disliked),
            _ => Err(UnknownFeedback(s.to_string())),
        }
    }
}

/// Fields the client supplies when saving a recommendation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub song_title: String,
    pub artist: String,
    pub youtube_link: String,
    pub mood: String,
    pub language: String,
    pub genre: String,
}

/// Row as stored in `song_history`.
#[derive(Debug, FromRow)]
pub struct HistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub song_title: String,
    pub artist: String,
    pub youtube_link: String,
    pub mood: String,
    pub language: String,
    pub genre: String,
    pub feedback: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub song_title: String,
    pub artist: String,
    pub youtube_link: String,
    pub mood: String,
    pub language: String,
    pub genre: String,
    pub feedback: Option<Feedback>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(r: HistoryRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            song_title: r.song_title,
            artist: r.artist,
            youtube_link: r.youtube_link,
            mood: r.mood,
            language: r.language,
            genre: r.genre,
            // the column has a CHECK constraint, anything else is unreachable
            feedback: r.feedback.and_then(|f| f.parse().ok()),
            created_at: r.created_at,
        }
    }
}

/// Exact-match community filter. Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityFilter {
    pub mood: Option<String>,
    pub language: Option<String>,
    pub genre: Option<String>,
}

impl CommunityFilter {
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        Self {
            mood: keep(self.mood),
            language: keep(self.language),
            genre: keep(self.genre),
        }
    }
}
