use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::common::CountryId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub slug: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Country {
    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Country>("SELECT * FROM countries ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(id: CountryId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(slug: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE slug = ?")
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
        sqlx::query_as::<_, Country>(
            r#"
            INSERT INTO countries (id, name, slug, code, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(CountryId::new())
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
            INSERT INTO countries (id, name, slug, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(CountryId::new())
        .bind(name)
        .bind(slug)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_listings(id: CountryId, conn: &mut SqliteConnection) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM listings WHERE country_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn delete(id: CountryId, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM countries")
            .fetch_one(pool)
            .await
    }
}
