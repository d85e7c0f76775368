use serde::{Deserialize, Serialize};

use super::repo_types::{Feedback, HistoryEntry};
use crate::errors::AppError;

/// `{"feedback": "liked" | "disliked" | null}`; null or missing clears it.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: Option<String>,
}

impl FeedbackRequest {
    pub fn parse(&self) -> Result<Option<Feedback>, AppError> {
        self.feedback
            .as_deref()
            .map(str::parse::<Feedback>)
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct SavedPayload {
    pub history: HistoryEntry,
}

#[derive(Debug, Serialize)]
pub struct HistoryPayload {
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedPayload {
    pub updated: HistoryEntry,
}

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    pub message: &'static str,
}
