use std::{sync::Arc, time::Duration};

use sqlx::PgPool;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::{PgUserStore, UserStore};
use crate::clients::{ArtLookup, LastFmClient, MistralClient, YoutubeSearch};
use crate::config::AppConfig;
use crate::history::repo::{HistoryStore, PgHistoryStore};
use crate::recommend::Recommender;

#[derive(Clone)]
pub struct AppState {
    pub jwt: JwtKeys,
    pub users: Arc<dyn UserStore>,
    pub history: Arc<dyn HistoryStore>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Postgres-backed stores and live HTTP clients sharing one connection pool.
    pub fn init(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.lookup.http_timeout_secs))
            .build()?;

        let art = config.lookup.lastfm_api_key.as_ref().map(|key| {
            Arc::new(LastFmClient::new(
                http.clone(),
                config.lookup.lastfm_api_url.clone(),
                key.clone(),
            )) as Arc<dyn ArtLookup>
        });
        if art.is_none() {
            tracing::info!("LASTFM_API_KEY not set; cover art lookup disabled");
        }

        let recommender = Recommender::new(
            Arc::new(MistralClient::new(http.clone(), &config.llm)),
            Arc::new(YoutubeSearch::new(
                http,
                config.lookup.youtube_search_url.clone(),
            )),
            art,
        );

        Ok(Self::from_parts(
            &config,
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgHistoryStore::new(db)),
            Arc::new(recommender),
        ))
    }

    pub fn from_parts(
        config: &AppConfig,
        users: Arc<dyn UserStore>,
        history: Arc<dyn HistoryStore>,
        recommender: Arc<Recommender>,
    ) -> Self {
        Self {
            jwt: JwtKeys::from(&config.jwt),
            users,
            history,
            recommender,
        }
    }
}
