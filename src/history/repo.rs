use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{CommunityFilter, Feedback, HistoryEntry, HistoryRow, NewHistoryEntry};

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn insert(&self, owner: Uuid, entry: &NewHistoryEntry) -> anyhow::Result<HistoryEntry>;
    /// Newest first.
    async fn list_by_owner(&self, owner: Uuid, limit: i64) -> anyhow::Result<Vec<HistoryEntry>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<HistoryEntry>>;
    /// Updates only when `owner` still owns the entry; `None` otherwise.
    async fn update_feedback(
        &self,
        id: Uuid,
        owner: Uuid,
        feedback: Option<Feedback>,
    ) -> anyhow::Result<Option<HistoryEntry>>;
    /// Deletes only when `owner` still owns the entry.
    async fn delete(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool>;
    /// Newest first, across all owners.
    async fn list_filtered(
        &self,
        filter: &CommunityFilter,
        limit: i64,
    ) -> anyhow::Result<Vec<HistoryEntry>>;
}

#[derive(Clone)]
pub struct PgHistoryStore {
    db: PgPool,
}

impl PgHistoryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const COLUMNS: &str = "id, user_id, song_title, artist, youtube_link, mood, language, genre, \
                       feedback, created_at";

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn insert(&self, owner: Uuid, entry: &NewHistoryEntry) -> anyhow::Result<HistoryEntry> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            r#"
            INSERT INTO song_history (user_id, song_title, artist, youtube_link, mood, language, genre)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&entry.song_title)
        .bind(&entry.artist)
        .bind(&entry.youtube_link)
        .bind(&entry.mood)
        .bind(&entry.language)
        .bind(&entry.genre)
        .fetch_one(&self.db)
        .await
        .context("insert history entry")?;
        Ok(row.into())
    }

    async fn list_by_owner(&self, owner: Uuid, limit: i64) -> anyhow::Result<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM song_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(owner)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list history by owner")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<HistoryEntry>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {COLUMNS} FROM song_history WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find history entry")?;
        Ok(row.map(Into::into))
    }

    async fn update_feedback(
        &self,
        id: Uuid,
        owner: Uuid,
        feedback: Option<Feedback>,
    ) -> anyhow::Result<Option<HistoryEntry>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            r#"
            UPDATE song_history
               SET feedback = $3
             WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(feedback.map(|f| f.as_str()))
        .fetch_optional(&self.db)
        .await
        .context("update history feedback")?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM song_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await
            .context("delete history entry")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_filtered(
        &self,
        filter: &CommunityFilter,
        limit: i64,
    ) -> anyhow::Result<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM song_history
            WHERE ($1::text IS NULL OR mood = $1)
              AND ($2::text IS NULL OR language = $2)
              AND ($3::text IS NULL OR genre = $3)
            ORDER BY created_at DESC
            LIMIT $4
            "#
        ))
        .bind(filter.mood.as_deref())
        .bind(filter.language.as_deref())
        .bind(filter.genre.as_deref())
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list community entries")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
