//! Ledger operations. Mutations check ownership before writing; the write
//! itself is also scoped to the owner, so a lost race reads as `NotFound`.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    repo::HistoryStore,
    repo_types::{CommunityFilter, Feedback, HistoryEntry, NewHistoryEntry},
};
use crate::errors::AppError;

pub const HISTORY_LIMIT: i64 = 100;
pub const COMMUNITY_LIMIT: i64 = 100;

const ENTRY_NOT_FOUND: &str = "Song not found";

#[instrument(skip(store, entry))]
pub async fn append(
    store: &dyn HistoryStore,
    owner: Uuid,
    entry: &NewHistoryEntry,
) -> Result<HistoryEntry, AppError> {
    let saved = store.insert(owner, entry).await?;
    info!(entry_id = %saved.id, %owner, "history entry saved");
    Ok(saved)
}

pub async fn list(store: &dyn HistoryStore, owner: Uuid) -> Result<Vec<HistoryEntry>, AppError> {
    Ok(store.list_by_owner(owner, HISTORY_LIMIT).await?)
}

#[instrument(skip(store))]
pub async fn set_feedback(
    store: &dyn HistoryStore,
    entry_id: Uuid,
    feedback: Option<Feedback>,
    acting: Uuid,
) -> Result<HistoryEntry, AppError> {
    let entry = owned_entry(store, entry_id, acting).await?;
    store
        .update_feedback(entry.id, acting, feedback)
        .await?
        .ok_or_else(|| AppError::NotFound(ENTRY_NOT_FOUND.into()))
}

#[instrument(skip(store))]
pub async fn remove(store: &dyn HistoryStore, entry_id: Uuid, acting: Uuid) -> Result<(), AppError> {
    let entry = owned_entry(store, entry_id, acting).await?;
    if !store.delete(entry.id, acting).await? {
        return Err(AppError::NotFound(ENTRY_NOT_FOUND.into()));
    }
    info!(%entry_id, "history entry deleted");
    Ok(())
}

pub async fn community(
    store: &dyn HistoryStore,
    filter: CommunityFilter,
) -> Result<Vec<HistoryEntry>, AppError> {
    Ok(store
        .list_filtered(&filter.normalized(), COMMUNITY_LIMIT)
        .await?)
}

async fn owned_entry(
    store: &dyn HistoryStore,
    entry_id: Uuid,
    acting: Uuid,
) -> Result<HistoryEntry, AppError> {
    let entry = store
        .find(entry_id)
        .await?
        .ok_or_else(|| AppError::NotFound(ENTRY_NOT_FOUND.into()))?;
    ensure_owner(&entry, acting)?;
    Ok(entry)
}

pub fn ensure_owner(entry: &HistoryEntry, acting: Uuid) -> Result<(), AppError> {
    if entry.user_id != acting {
        warn!(entry_id = %entry.id, owner = %entry.user_id, %acting, "ownership check failed");
        return Err(AppError::Forbidden);
    }
    Ok(())
}
