//! Admin tag housekeeping.

use sqlx::SqlitePool;
use tracing::info;

use crate::common::{DirectoryError, DirectoryResult, TagId};
use crate::domains::tag::models::Tag;

/// Refresh every tag's cached approved-listing count.
pub async fn recompute_tag_usage_counts(pool: &SqlitePool) -> DirectoryResult<u64> {
    let mut tx = pool.begin().await?;
    let updated = Tag::recompute_usage_counts(&mut tx).await?;
    tx.commit().await?;

    info!(tags = updated, "Recomputed tag usage counts");
    Ok(updated)
}

/// Remove tags no listing uses any more. Tags attached only to pending or
/// rejected listings are kept.
pub async fn delete_unused_tags(pool: &SqlitePool) -> DirectoryResult<u64> {
    let mut tx = pool.begin().await?;
    let deleted = Tag::delete_unused(&mut tx).await?;
    tx.commit().await?;

    info!(deleted, "Deleted unused tags");
    Ok(deleted)
}

pub async fn delete_tag(id: TagId, pool: &SqlitePool) -> DirectoryResult<()> {
    let mut conn = pool.acquire().await?;
    if !Tag::delete(id, &mut conn).await? {
        return Err(DirectoryError::not_found("tag", id));
    }

    info!(tag_id = %id, "Deleted tag");
    Ok(())
}
