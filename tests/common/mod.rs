#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use moodmusic::{
    app::build_app,
    auth::{
        repo::{DuplicateUser, UserStore},
        repo_types::User,
    },
    clients::{ArtImage, ArtLookup, CompletionClient, LlmError, LookupError, VideoSearch},
    config::{AppConfig, JwtConfig, LlmConfig, LookupConfig},
    history::{
        repo::HistoryStore,
        repo_types::{CommunityFilter, Feedback, HistoryEntry, NewHistoryEntry},
    },
    recommend::Recommender,
    state::AppState,
};

// ---- stores ----

#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email == email)
            .or_else(|| users.iter().find(|u| u.username == username))
            .cloned())
    }

    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(DuplicateUser::Email.into());
        }
        if users.iter().any(|u| u.username == username) {
            return Err(DuplicateUser::Username.into());
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Insertion order stands in for `created_at` ordering.
#[derive(Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn insert(&self, owner: Uuid, entry: &NewHistoryEntry) -> anyhow::Result<HistoryEntry> {
        let saved = HistoryEntry {
            id: Uuid::new_v4(),
            user_id: owner,
            song_title: entry.song_title.clone(),
            artist: entry.artist.clone(),
            youtube_link: entry.youtube_link.clone(),
            mood: entry.mood.clone(),
            language: entry.language.clone(),
            genre: entry.genre.clone(),
            feedback: None,
            created_at: OffsetDateTime::now_utc(),
        };
        self.entries.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn list_by_owner(&self, owner: Uuid, limit: i64) -> anyhow::Result<Vec<HistoryEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| e.user_id == owner)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<HistoryEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn update_feedback(
        &self,
        id: Uuid,
        owner: Uuid,
        feedback: Option<Feedback>,
    ) -> anyhow::Result<Option<HistoryEntry>> {
        let mut entries = self.entries.lock().unwrap();
        Ok(entries
            .iter_mut()
            .find(|e| e.id == id && e.user_id == owner)
            .map(|e| {
                e.feedback = feedback;
                e.clone()
            }))
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| !(e.id == id && e.user_id == owner));
        Ok(entries.len() < before)
    }

    async fn list_filtered(
        &self,
        filter: &CommunityFilter,
        limit: i64,
    ) -> anyhow::Result<Vec<HistoryEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| community_match(filter, e))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Mirrors the SQL predicate: an absent field matches anything, a present one must be equal.
fn community_match(filter: &CommunityFilter, entry: &HistoryEntry) -> bool {
    fn field_ok(want: &Option<String>, have: &str) -> bool {
        want.as_deref().map_or(true, |w| w == have)
    }
    field_ok(&filter.mood, &entry.mood)
        && field_ok(&filter.language, &entry.language)
        && field_ok(&filter.genre, &entry.genre)
}

// ---- external clients ----

/// Returns the scripted completion, or fails like an unreachable API when `None`.
pub struct ScriptedCompletion(pub Option<String>);

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.0.clone().ok_or(LlmError::Api {
            status: 500,
            message: "upstream down".into(),
        })
    }
}

/// Queries containing "missing" find nothing, "broken" errors, anything else resolves.
pub struct FakeVideos;

#[async_trait]
impl VideoSearch for FakeVideos {
    async fn first_video_id(&self, query: &str) -> Result<Option<String>, LookupError> {
        if query.contains("broken") {
            Err(LookupError::Status(503))
        } else if query.contains("missing") {
            Ok(None)
        } else {
            Ok(Some("vid_1234567".into()))
        }
    }
}

pub struct FakeArt;

#[async_trait]
impl ArtLookup for FakeArt {
    async fn track_images(&self, _artist: &str, track: &str) -> Result<Vec<ArtImage>, LookupError> {
        Ok(vec![
            ArtImage {
                url: format!("https://img.example/{track}/small.png"),
                size: "small".into(),
            },
            ArtImage {
                url: format!("https://img.example/{track}/xl.png"),
                size: "extralarge".into(),
            },
        ])
    }

    async fn artist_images(&self, _artist: &str) -> Result<Vec<ArtImage>, LookupError> {
        Ok(vec![])
    }
}

// ---- app ----

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        jwt: JwtConfig {
            secret: "integration-secret".into(),
            issuer: "moodmusic".into(),
            audience: "moodmusic-users".into(),
            ttl_minutes: 60 * 24 * 7,
        },
        llm: LlmConfig {
            api_url: "http://llm.invalid".into(),
            api_key: "unused".into(),
            model: "mistral-large-2411".into(),
            temperature: 0.7,
        },
        lookup: LookupConfig {
            youtube_search_url: "http://youtube.invalid".into(),
            lastfm_api_url: "http://lastfm.invalid".into(),
            lastfm_api_key: None,
            http_timeout_secs: 5,
        },
        host: "127.0.0.1".into(),
        port: 0,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_app_with(completion: Option<&str>, with_art: bool) -> TestApp {
    let art: Option<Arc<dyn ArtLookup>> = if with_art {
        Some(Arc::new(FakeArt))
    } else {
        None
    };
    let recommender = Recommender::new(
        Arc::new(ScriptedCompletion(completion.map(str::to_string))),
        Arc::new(FakeVideos),
        art,
    );
    let state = AppState::from_parts(
        &test_config(),
        Arc::new(MemoryUsers::default()),
        Arc::new(MemoryHistory::default()),
        Arc::new(recommender),
    );
    TestApp {
        router: build_app(state.clone()),
        state,
    }
}

pub fn test_app() -> TestApp {
    test_app_with(Some("Song - Artist"), false)
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        self.send_request(req).await
    }

    pub async fn send_request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Registers a user and returns `(token, user id)`.
    pub async fn register(&self, username: &str) -> (String, Uuid) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "correct-horse",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");
        let token = body["token"].as_str().unwrap().to_string();
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
        (token, id)
    }
}

pub fn song(title: &str, mood: &str, language: &str, genre: &str) -> Value {
    serde_json::json!({
        "songTitle": title,
        "artist": "Some Artist",
        "youtubeLink": "https://www.youtube.com/watch?v=vid_1234567",
        "mood": mood,
        "language": language,
        "genre": genre,
    })
}
