use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::common::CategoryId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Category with its number of approved listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    pub category: Category,
    pub listing_count: i64,
}

impl Category {
    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(id: CategoryId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(slug: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = ?")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Categories with the most approved listings first. Categories without
    /// any approved listing are left out.
    pub async fn find_popular(limit: i64, pool: &SqlitePool) -> sqlx::Result<Vec<CategoryWithCount>> {
        sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.*, COUNT(l.id) AS listing_count
            FROM categories c
            INNER JOIN listings l ON l.category_id = c.id AND l.status = 'approved'
            GROUP BY c.id
            ORDER BY listing_count DESC, c.name
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Insert a category. `slug` is stored as given; a clash with an existing
    /// name or slug fails on the unique constraint.
    pub async fn create(
        name: &str,
        slug: &str,
        description: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, slug, description, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(CategoryId::new())
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
    }

    /// Insert unless a category with this name exists. Returns whether a row
    /// was written.
    pub async fn insert_if_missing(
        name: &str,
        slug: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(CategoryId::new())
        .bind(name)
        .bind(slug)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update name and description. The slug stays as created.
    pub async fn update(
        id: CategoryId,
        name: &str,
        description: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ?, description = ? WHERE id = ? RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Listings of any status filed under this category.
    pub async fn count_listings(id: CategoryId, conn: &mut SqliteConnection) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM listings WHERE category_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn delete(id: CategoryId, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
    }
}
