//! Slug generation.
//!
//! `slugify` is pure. `unique_slug` probes persisted storage with `base`,
//! `base-1`, `base-2`, ... until it finds an unused candidate; it only reads.

use sqlx::SqliteConnection;
use uuid::Uuid;

/// Collections whose slugs must be unique and are allocated by probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugScope {
    Listings,
    Tags,
    Pages,
    BlogPosts,
}

impl SlugScope {
    fn table(self) -> &'static str {
        match self {
            SlugScope::Listings => "listings",
            SlugScope::Tags => "tags",
            SlugScope::Pages => "pages",
            SlugScope::BlogPosts => "blog_posts",
        }
    }

    /// Used when the text has nothing slug-able in it (e.g. only emoji).
    fn fallback(self) -> &'static str {
        match self {
            SlugScope::Listings => "group",
            SlugScope::Tags => "tag",
            SlugScope::Pages => "page",
            SlugScope::BlogPosts => "post",
        }
    }
}

/// Lowercase, hyphenated, ASCII-only token. Non-ASCII letters are
/// transliterated ("Café Crème" -> "cafe-creme").
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

fn base_slug(text: &str, scope: SlugScope) -> String {
    let base = slugify(text);
    if base.is_empty() {
        scope.fallback().to_string()
    } else {
        base
    }
}

/// Allocate a slug that no other row in `scope` uses.
///
/// `exclude` skips the row being edited so that re-saving an unchanged name
/// keeps its slug.
pub async fn unique_slug(
    conn: &mut SqliteConnection,
    scope: SlugScope,
    text: &str,
    exclude: Option<Uuid>,
) -> Result<String, sqlx::Error> {
    let base = base_slug(text, scope);
    let mut candidate = base.clone();
    let mut counter = 1;

    while slug_taken(conn, scope, &candidate, exclude).await? {
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }

    Ok(candidate)
}

async fn slug_taken(
    conn: &mut SqliteConnection,
    scope: SlugScope,
    candidate: &str,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = ? AND (? IS NULL OR id != ?))",
        scope.table()
    );
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(candidate)
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&mut *conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::Connection;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Crypto Traders Hub"), "crypto-traders-hub");
        assert_eq!(slugify("  Music / Audio / Songs  "), "music-audio-songs");
        assert_eq!(slugify("Adult/18+/Hot"), "adult-18-hot");
    }

    #[test]
    fn slugify_transliterates_accents() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
    }

    #[test]
    fn empty_base_falls_back_to_scope_name() {
        assert_eq!(base_slug("!!!", SlugScope::Listings), "group");
        assert_eq!(base_slug("", SlugScope::Pages), "page");
    }

    #[tokio::test]
    async fn probing_appends_increasing_suffixes() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();
        sqlx::query("CREATE TABLE pages (id BLOB PRIMARY KEY NOT NULL, slug TEXT NOT NULL UNIQUE)")
            .execute(&mut *conn)
            .await
            .unwrap();

        let mut allocated = Vec::new();
        for _ in 0..3 {
            let slug = unique_slug(&mut conn, SlugScope::Pages, "About Us", None)
                .await
                .unwrap();
            sqlx::query("INSERT INTO pages (id, slug) VALUES (?, ?)")
                .bind(Uuid::now_v7())
                .bind(&slug)
                .execute(&mut *conn)
                .await
                .unwrap();
            allocated.push(slug);
        }

        assert_eq!(allocated, vec!["about-us", "about-us-1", "about-us-2"]);
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn probing_ignores_the_excluded_row() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();
        sqlx::query("CREATE TABLE tags (id BLOB PRIMARY KEY NOT NULL, slug TEXT NOT NULL UNIQUE)")
            .execute(&mut *conn)
            .await
            .unwrap();
        let own_id = Uuid::now_v7();
        sqlx::query("INSERT INTO tags (id, slug) VALUES (?, 'news')")
            .bind(own_id)
            .execute(&mut *conn)
            .await
            .unwrap();

        let same = unique_slug(&mut conn, SlugScope::Tags, "News", Some(own_id))
            .await
            .unwrap();
        let other = unique_slug(&mut conn, SlugScope::Tags, "News", None)
            .await
            .unwrap();

        assert_eq!(same, "news");
        assert_eq!(other, "news-1");
    }
}
