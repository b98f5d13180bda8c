use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::common::utils::{unique_slug, SlugScope};
use crate::common::{ListingId, TagId};

/// Free-text label attached to listings. Created lazily the first time a
/// submission or edit names it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    /// Cached count of approved listings carrying this tag. Only refreshed by
    /// `recompute_usage_counts`.
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Case-insensitive lookup key.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Tag Queries
// =============================================================================

impl Tag {
    pub async fn find_by_id(id: TagId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(slug: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE slug = ?")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find an existing tag by name, ignoring case.
    pub async fn find_by_name(name: &str, conn: &mut SqliteConnection) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE name_key = ?")
            .bind(name_key(name))
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new tag with a collision-free slug.
    pub async fn create(name: &str, conn: &mut SqliteConnection) -> sqlx::Result<Self> {
        let name = name.trim();
        let slug = unique_slug(conn, SlugScope::Tags, name, None).await?;

        sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (id, name, name_key, slug, usage_count, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(TagId::new())
        .bind(name)
        .bind(name_key(name))
        .bind(slug)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
    }

    /// Look the tag up by name and create it when missing.
    ///
    /// Returns the tag and whether it was created by this call.
    pub async fn find_or_create(
        name: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<(Self, bool)> {
        if let Some(existing) = Self::find_by_name(name, conn).await? {
            return Ok((existing, false));
        }
        let created = Self::create(name, conn).await?;
        Ok((created, true))
    }

    /// All tags, alphabetical. `search` filters by substring of the name.
    pub async fn find_all(search: Option<&str>, pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT * FROM tags
            WHERE (?1 IS NULL OR name_key LIKE '%' || lower(?1) || '%')
            ORDER BY name_key
            "#,
        )
        .bind(search)
        .fetch_all(pool)
        .await
    }

    /// Tag names for submit-form autocompletion.
    pub async fn suggestions(limit: i64, pool: &SqlitePool) -> sqlx::Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM tags ORDER BY name_key LIMIT ?")
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Tags ranked by how many approved listings carry them right now.
    pub async fn find_popular(limit: i64, pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.*
            FROM tags t
            INNER JOIN listing_tags lt ON lt.tag_id = t.id
            INNER JOIN listings l ON l.id = lt.listing_id
            WHERE l.status = 'approved'
            GROUP BY t.id
            ORDER BY COUNT(l.id) DESC, t.name_key
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Tags of one listing in the order they were entered.
    pub async fn find_for_listing(
        listing_id: ListingId,
        pool: &SqlitePool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.*
            FROM tags t
            INNER JOIN listing_tags lt ON lt.tag_id = t.id
            WHERE lt.listing_id = ?
            ORDER BY lt.position
            "#,
        )
        .bind(listing_id)
        .fetch_all(pool)
        .await
    }

    /// Set every tag's usage_count to the number of approved listings using it.
    pub async fn recompute_usage_counts(conn: &mut SqliteConnection) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tags SET usage_count = (
                SELECT COUNT(*)
                FROM listing_tags lt
                INNER JOIN listings l ON l.id = lt.listing_id
                WHERE lt.tag_id = tags.id AND l.status = 'approved'
            )
            "#,
        )
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete tags no listing references, whatever that listing's status.
    pub async fn delete_unused(conn: &mut SqliteConnection) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "DELETE FROM tags WHERE NOT EXISTS (SELECT 1 FROM listing_tags lt WHERE lt.tag_id = tags.id)",
        )
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete one tag. Its listing associations go with it.
    pub async fn delete(id: TagId, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(pool)
            .await
    }
}
