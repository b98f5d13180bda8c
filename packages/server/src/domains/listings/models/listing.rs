use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use typed_builder::TypedBuilder;

use crate::common::{CategoryId, CountryId, LanguageId, ListingId, TagId};

/// A submitted group invite link and everything the directory knows about it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub invite_link: String,
    pub invite_code: String,
    pub image_url: Option<String>,
    pub member_count: i64,
    pub category_id: CategoryId,
    pub country_id: CountryId,
    pub language_id: LanguageId,
    pub status: ListingStatus,
    pub featured: bool,
    pub admin_notes: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_verified: Option<DateTime<Utc>>,
}

/// Moderation state. New submissions start as `Pending`; admins move them to
/// `Approved` or `Rejected` and may set any state when editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Approved => write!(f, "approved"),
            ListingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(ListingStatus::Pending),
            "approved" => Ok(ListingStatus::Approved),
            "rejected" => Ok(ListingStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}

/// Insert parameters. Status is not settable: every new listing is pending.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateListing {
    pub name: String,
    pub slug: String,
    #[builder(default)]
    pub description: Option<String>,
    pub invite_link: String,
    pub invite_code: String,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default = 0)]
    pub member_count: i64,
    pub category_id: CategoryId,
    pub country_id: CountryId,
    pub language_id: LanguageId,
    pub meta_title: String,
    pub meta_description: String,
}

/// Full replacement of the admin-editable fields.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct UpdateListing {
    pub name: String,
    pub slug: String,
    #[builder(default)]
    pub description: Option<String>,
    pub invite_link: String,
    pub invite_code: String,
    #[builder(default)]
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub country_id: CountryId,
    pub language_id: LanguageId,
    pub status: ListingStatus,
    pub featured: bool,
    #[builder(default)]
    pub admin_notes: Option<String>,
    #[builder(default)]
    pub meta_title: Option<String>,
    #[builder(default)]
    pub meta_description: Option<String>,
}

/// Public browse filters. Taxonomy filters are slugs; `query` matches name or
/// description.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category_slug: Option<String>,
    pub country_slug: Option<String>,
    pub language_slug: Option<String>,
    pub tag_slug: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ListingStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub featured: i64,
}

impl Listing {
    pub async fn find_by_id(id: ListingId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_invite_link(link: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE invite_link = ?")
            .bind(link)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_invite_code(code: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE invite_code = ?")
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Approved listing by slug, optionally constrained to a category slug.
    pub async fn find_approved_by_slug(
        slug: &str,
        category_slug: Option<&str>,
        pool: &SqlitePool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT l.* FROM listings l
            INNER JOIN categories c ON c.id = l.category_id
            WHERE l.slug = ?1 AND l.status = 'approved'
              AND (?2 IS NULL OR c.slug = ?2)
            "#,
        )
        .bind(slug)
        .bind(category_slug)
        .fetch_optional(pool)
        .await
    }

    /// Approved listings matching `filter`, featured first then newest.
    /// Returns the page and the total number of matches.
    pub async fn search_approved(
        filter: &ListingFilter,
        limit: i64,
        offset: i64,
        pool: &SqlitePool,
    ) -> sqlx::Result<(Vec<Self>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM listings l");
        push_public_filters(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new("SELECT l.* FROM listings l");
        push_public_filters(&mut select, filter);
        select
            .push(" ORDER BY l.featured DESC, l.created_at DESC, l.id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let listings = select.build_query_as::<Listing>().fetch_all(pool).await?;

        Ok((listings, total))
    }

    /// Admin listing view over every status, newest first. `search` matches
    /// the name.
    pub async fn search_admin(
        status: Option<ListingStatus>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
        pool: &SqlitePool,
    ) -> sqlx::Result<(Vec<Self>, i64)> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM listings
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR name LIKE '%' || ?2 || '%')
            "#,
        )
        .bind(status)
        .bind(search)
        .fetch_one(pool)
        .await?;

        let listings = sqlx::query_as::<_, Listing>(
            r#"
            SELECT * FROM listings
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR name LIKE '%' || ?2 || '%')
            ORDER BY created_at DESC, id DESC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(status)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((listings, total))
    }

    /// Approved listings sharing a tag with this one, or in the same category
    /// when it has no tags.
    pub async fn find_related(&self, limit: i64, pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        let has_tags: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM listing_tags WHERE listing_id = ?)")
                .bind(self.id)
                .fetch_one(pool)
                .await?;

        if has_tags {
            sqlx::query_as::<_, Listing>(
                r#"
                SELECT DISTINCT l.* FROM listings l
                INNER JOIN listing_tags lt ON lt.listing_id = l.id
                WHERE lt.tag_id IN (SELECT tag_id FROM listing_tags WHERE listing_id = ?1)
                  AND l.id != ?1 AND l.status = 'approved'
                ORDER BY l.featured DESC, l.created_at DESC
                LIMIT ?2
                "#,
            )
            .bind(self.id)
            .bind(limit)
            .fetch_all(pool)
            .await
        } else {
            sqlx::query_as::<_, Listing>(
                r#"
                SELECT * FROM listings
                WHERE category_id = ?1 AND id != ?2 AND status = 'approved'
                ORDER BY featured DESC, created_at DESC
                LIMIT ?3
                "#,
            )
            .bind(self.category_id)
            .bind(self.id)
            .bind(limit)
            .fetch_all(pool)
            .await
        }
    }

    pub async fn stats(pool: &SqlitePool) -> sqlx::Result<ListingStats> {
        sqlx::query_as::<_, ListingStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(status = 'pending'), 0) AS pending,
                COALESCE(SUM(status = 'approved'), 0) AS approved,
                COALESCE(SUM(status = 'rejected'), 0) AS rejected,
                COALESCE(SUM(featured), 0) AS featured
            FROM listings
            "#,
        )
        .fetch_one(pool)
        .await
    }

    /// Insert a pending, unfeatured listing.
    pub async fn create(input: CreateListing, conn: &mut SqliteConnection) -> sqlx::Result<Self> {
        let now = Utc::now();
        sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (
                id, name, slug, description, invite_link, invite_code, image_url,
                member_count, category_id, country_id, language_id, status, featured,
                meta_title, meta_description, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(ListingId::new())
        .bind(input.name)
        .bind(input.slug)
        .bind(input.description)
        .bind(input.invite_link)
        .bind(input.invite_code)
        .bind(input.image_url)
        .bind(input.member_count)
        .bind(input.category_id)
        .bind(input.country_id)
        .bind(input.language_id)
        .bind(ListingStatus::Pending)
        .bind(input.meta_title)
        .bind(input.meta_description)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await
    }

    pub async fn update(
        id: ListingId,
        input: UpdateListing,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings SET
                name = ?, slug = ?, description = ?, invite_link = ?, invite_code = ?,
                image_url = ?, category_id = ?, country_id = ?, language_id = ?,
                status = ?, featured = ?, admin_notes = ?, meta_title = ?,
                meta_description = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(input.name)
        .bind(input.slug)
        .bind(input.description)
        .bind(input.invite_link)
        .bind(input.invite_code)
        .bind(input.image_url)
        .bind(input.category_id)
        .bind(input.country_id)
        .bind(input.language_id)
        .bind(input.status)
        .bind(input.featured)
        .bind(input.admin_notes)
        .bind(input.meta_title)
        .bind(input.meta_description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Replace the listing's tag set, keeping `tag_ids` order.
    pub async fn replace_tags(
        id: ListingId,
        tag_ids: &[TagId],
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM listing_tags WHERE listing_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for (position, tag_id) in tag_ids.iter().enumerate() {
            sqlx::query("INSERT INTO listing_tags (listing_id, tag_id, position) VALUES (?, ?, ?)")
                .bind(id)
                .bind(tag_id)
                .bind(position as i64)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Set status on every listed id. Returns how many rows matched.
    pub async fn set_status_many(
        ids: &[ListingId],
        status: ListingStatus,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<u64> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE listings SET status = ");
        query
            .push_bind(status)
            .push(", updated_at = ")
            .push_bind(Utc::now());
        push_id_list(&mut query, ids);
        Ok(query.build().execute(&mut *conn).await?.rows_affected())
    }

    pub async fn set_featured_many(
        ids: &[ListingId],
        featured: bool,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<u64> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE listings SET featured = ");
        query
            .push_bind(featured)
            .push(", updated_at = ")
            .push_bind(Utc::now());
        push_id_list(&mut query, ids);
        Ok(query.build().execute(&mut *conn).await?.rows_affected())
    }

    /// Delete listings; their tag associations cascade.
    pub async fn delete_many(ids: &[ListingId], conn: &mut SqliteConnection) -> sqlx::Result<u64> {
        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM listings");
        push_id_list(&mut query, ids);
        Ok(query.build().execute(&mut *conn).await?.rows_affected())
    }

    pub async fn mark_verified(id: ListingId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET last_verified = ?1, updated_at = ?1 WHERE id = ?2 RETURNING *",
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM listings")
            .fetch_one(pool)
            .await
    }
}

fn push_id_list(query: &mut QueryBuilder<'_, Sqlite>, ids: &[ListingId]) {
    query.push(" WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

fn push_public_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &ListingFilter) {
    query.push(" WHERE l.status = 'approved'");

    if let Some(slug) = &filter.category_slug {
        query
            .push(" AND l.category_id IN (SELECT id FROM categories WHERE slug = ")
            .push_bind(slug.clone())
            .push(")");
    }
    if let Some(slug) = &filter.country_slug {
        query
            .push(" AND l.country_id IN (SELECT id FROM countries WHERE slug = ")
            .push_bind(slug.clone())
            .push(")");
    }
    if let Some(slug) = &filter.language_slug {
        query
            .push(" AND l.language_id IN (SELECT id FROM languages WHERE slug = ")
            .push_bind(slug.clone())
            .push(")");
    }
    if let Some(slug) = &filter.tag_slug {
        query
            .push(
                " AND l.id IN (SELECT lt.listing_id FROM listing_tags lt \
                 INNER JOIN tags t ON t.id = lt.tag_id WHERE t.slug = ",
            )
            .push_bind(slug.clone())
            .push(")");
    }
    if let Some(term) = &filter.query {
        let pattern = format!("%{}%", term);
        query
            .push(" AND (l.name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR l.description LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
