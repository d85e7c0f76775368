use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Chat-completion endpoint used to generate song suggestions.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

/// Video search and cover-art lookups. Art lookup is off without a key.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    pub youtube_search_url: String,
    pub lastfm_api_url: String,
    pub lastfm_api_key: Option<String>,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
    pub lookup: LookupConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_source<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            get(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.into());

        let jwt = JwtConfig {
            secret: require("JWT_SECRET")?,
            issuer: or_default("JWT_ISSUER", "moodmusic"),
            audience: or_default("JWT_AUDIENCE", "moodmusic-users"),
            ttl_minutes: parse_or(get("JWT_TTL_MINUTES"), 60 * 24 * 7, "JWT_TTL_MINUTES")?,
        };

        let llm = LlmConfig {
            api_url: or_default(
                "MISTRAL_API_URL",
                "https://api.mistral.ai/v1/chat/completions",
            ),
            api_key: require("MISTRAL_API_KEY")?,
            model: or_default("MISTRAL_MODEL", "mistral-large-2411"),
            temperature: parse_or(get("MISTRAL_TEMPERATURE"), 0.7, "MISTRAL_TEMPERATURE")?,
        };

        let lookup = LookupConfig {
            youtube_search_url: or_default("YOUTUBE_SEARCH_URL", "https://www.youtube.com/results"),
            lastfm_api_url: or_default("LASTFM_API_URL", "https://ws.audioscrobbler.com/2.0/"),
            lastfm_api_key: get("LASTFM_API_KEY").filter(|v| !v.trim().is_empty()),
            http_timeout_secs: parse_or(get("HTTP_TIMEOUT_SECS"), 30, "HTTP_TIMEOUT_SECS")?,
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            jwt,
            llm,
            lookup,
            host: or_default("APP_HOST", "0.0.0.0"),
            port: parse_or(get("APP_PORT"), 8080, "APP_PORT")?,
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T, key: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {v}")),
        None => Ok(default),
    }
}
