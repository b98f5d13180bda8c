use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::common::BlogPostId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable blog post fields, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostDraft {
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: bool,
}

impl BlogPost {
    pub async fn find_by_id(id: BlogPostId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published_by_slug(
        slug: &str,
        pool: &SqlitePool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE slug = ? AND is_published = 1",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    /// Published posts, newest first.
    pub async fn find_published(
        limit: i64,
        offset: i64,
        pool: &SqlitePool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE is_published = 1
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Every post including drafts, newest first.
    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        draft: &BlogPostDraft,
        slug: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Self> {
        let now = Utc::now();
        sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (
                id, title, slug, content, excerpt, featured_image, meta_title,
                meta_description, is_published, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(BlogPostId::new())
        .bind(&draft.title)
        .bind(slug)
        .bind(&draft.content)
        .bind(&draft.excerpt)
        .bind(&draft.featured_image)
        .bind(&draft.meta_title)
        .bind(&draft.meta_description)
        .bind(draft.is_published)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
    }

    pub async fn update(
        id: BlogPostId,
        draft: &BlogPostDraft,
        slug: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts SET
                title = ?, slug = ?, content = ?, excerpt = ?, featured_image = ?,
                meta_title = ?, meta_description = ?, is_published = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(slug)
        .bind(&draft.content)
        .bind(&draft.excerpt)
        .bind(&draft.featured_image)
        .bind(&draft.meta_title)
        .bind(&draft.meta_description)
        .bind(draft.is_published)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    pub async fn delete(id: BlogPostId, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(pool)
            .await
    }
}
