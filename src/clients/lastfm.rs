use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ArtImage, ArtLookup, LookupError};

#[derive(Debug, Default, Deserialize)]
struct TrackInfoResponse {
    track: Option<TrackInfo>,
}

#[derive(Debug, Deserialize)]
struct TrackInfo {
    album: Option<ImageSet>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtistInfoResponse {
    artist: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
struct ImageSet {
    #[serde(default)]
    image: Vec<ArtImage>,
}

/// Last.fm `track.getInfo` / `artist.getInfo` client.
#[derive(Clone)]
pub struct LastFmClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl LastFmClient {
    pub fn new(http: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get<T>(&self, params: &[(&str, &str)]) -> Result<T, LookupError>
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        // unknown tracks and artists come back as 404 with an error body
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(T::default());
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ArtLookup for LastFmClient {
    async fn track_images(&self, artist: &str, track: &str) -> Result<Vec<ArtImage>, LookupError> {
        let info: TrackInfoResponse = self
            .get(&[("method", "track.getInfo"), ("artist", artist), ("track", track)])
            .await?;
        let images = info
            .track
            .and_then(|t| t.album)
            .map(|a| a.image)
            .unwrap_or_default();
        debug!(%artist, %track, count = images.len(), "album art lookup");
        Ok(images)
    }

    async fn artist_images(&self, artist: &str) -> Result<Vec<ArtImage>, LookupError> {
        let info: ArtistInfoResponse = self
            .get(&[("method", "artist.getInfo"), ("artist", artist)])
            .await?;
        let images = info.artist.map(|a| a.image).unwrap_or_default();
        debug!(%artist, count = images.len(), "artist art lookup");
        Ok(images)
    }
}
