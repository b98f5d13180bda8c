use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::common::PageId;

/// Static content page such as "About" or "Privacy Policy".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable page fields, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDraft {
    pub title: String,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: bool,
}

impl Page {
    pub async fn find_by_id(id: PageId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published_by_slug(
        slug: &str,
        pool: &SqlitePool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = ? AND is_published = 1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Every page including drafts, newest first.
    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        draft: &PageDraft,
        slug: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Self> {
        let now = Utc::now();
        sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (
                id, title, slug, content, meta_title, meta_description, is_published,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(PageId::new())
        .bind(&draft.title)
        .bind(slug)
        .bind(&draft.content)
        .bind(&draft.meta_title)
        .bind(&draft.meta_description)
        .bind(draft.is_published)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
    }

    pub async fn update(
        id: PageId,
        draft: &PageDraft,
        slug: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Page>(
            r#"
            UPDATE pages SET
                title = ?, slug = ?, content = ?, meta_title = ?, meta_description = ?,
                is_published = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(slug)
        .bind(&draft.content)
        .bind(&draft.meta_title)
        .bind(&draft.meta_description)
        .bind(draft.is_published)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    pub async fn delete(id: PageId, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pages")
            .fetch_one(pool)
            .await
    }
}
