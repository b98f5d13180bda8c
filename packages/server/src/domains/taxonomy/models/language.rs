use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::common::LanguageId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub slug: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Language {
    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(id: LanguageId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(slug: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE slug = ?")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        name: &str,
        slug: &str,
        code: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Language>(
            r#"
            INSERT INTO languages (id, name, slug, code, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(LanguageId::new())
        .bind(name)
        .bind(slug)
        .bind(code)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
    }

    pub async fn insert_if_missing(
        name: &str,
        slug: &str,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO languages (id, name, slug, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(LanguageId::new())
        .bind(name)
        .bind(slug)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_listings(id: LanguageId, conn: &mut SqliteConnection) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM listings WHERE language_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn delete(id: LanguageId, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM languages WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(pool)
            .await
    }
}
