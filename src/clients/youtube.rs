//! Key-less YouTube search: fetches the results page and reads the first
//! `videoId` out of the embedded initial data.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{header, Client};
use tracing::debug;

use super::{LookupError, VideoSearch};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}")
}

pub(crate) fn first_video_id(page: &str) -> Option<String> {
    lazy_static! {
        static ref VIDEO_ID_RE: Regex = Regex::new(r#""videoId"\s*:\s*"([A-Za-z0-9_-]{11})""#).unwrap();
    }
    VIDEO_ID_RE
        .captures(page)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Clone)]
pub struct YoutubeSearch {
    http: Client,
    search_url: String,
}

impl YoutubeSearch {
    pub fn new(http: Client, search_url: impl Into<String>) -> Self {
        Self {
            http,
            search_url: search_url.into(),
        }
    }
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    async fn first_video_id(&self, query: &str) -> Result<Option<String>, LookupError> {
        let response = self
            .http
            .get(&self.search_url)
            .query(&[("search_query", query)])
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let page = response.text().await?;
        let id = first_video_id(&page);
        debug!(%query, video_id = ?id, "video search complete");
        Ok(id)
    }
}
