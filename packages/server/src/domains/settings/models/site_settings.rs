use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

pub const DEFAULT_SITE_NAME: &str = "WhatsApp Groups Directory";
pub const DEFAULT_SITE_DESCRIPTION: &str = "Find and join WhatsApp groups from around the world";

/// Site-wide branding and integration settings. Exactly one row exists once
/// `get_or_initialize` has run.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: Option<String>,
    pub site_logo: Option<String>,
    pub favicon: Option<String>,
    pub google_analytics: Option<String>,
    pub custom_head_code: Option<String>,
    pub custom_footer_code: Option<String>,
    pub contact_email: Option<String>,
    pub social_facebook: Option<String>,
    pub social_twitter: Option<String>,
    pub social_instagram: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the settings row, already validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteSettingsDraft {
    pub site_name: String,
    pub site_description: Option<String>,
    pub site_logo: Option<String>,
    pub favicon: Option<String>,
    pub google_analytics: Option<String>,
    pub custom_head_code: Option<String>,
    pub custom_footer_code: Option<String>,
    pub contact_email: Option<String>,
    pub social_facebook: Option<String>,
    pub social_twitter: Option<String>,
    pub social_instagram: Option<String>,
}

impl SiteSettings {
    /// Read the settings row, creating it with defaults on first use.
    pub async fn get_or_initialize(pool: &SqlitePool) -> sqlx::Result<Self> {
        sqlx::query(
            r#"
            INSERT INTO site_settings (id, site_name, site_description, updated_at)
            VALUES (1, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(DEFAULT_SITE_NAME)
        .bind(DEFAULT_SITE_DESCRIPTION)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        sqlx::query_as::<_, SiteSettings>(
            r#"
            SELECT site_name, site_description, site_logo, favicon, google_analytics,
                   custom_head_code, custom_footer_code, contact_email, social_facebook,
                   social_twitter, social_instagram, updated_at
            FROM site_settings WHERE id = 1
            "#,
        )
        .fetch_one(pool)
        .await
    }

    pub async fn update(draft: &SiteSettingsDraft, pool: &SqlitePool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, SiteSettings>(
            r#"
            INSERT INTO site_settings (
                id, site_name, site_description, site_logo, favicon, google_analytics,
                custom_head_code, custom_footer_code, contact_email, social_facebook,
                social_twitter, social_instagram, updated_at
            )
            VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                site_name = excluded.site_name,
                site_description = excluded.site_description,
                site_logo = excluded.site_logo,
                favicon = excluded.favicon,
                google_analytics = excluded.google_analytics,
                custom_head_code = excluded.custom_head_code,
                custom_footer_code = excluded.custom_footer_code,
                contact_email = excluded.contact_email,
                social_facebook = excluded.social_facebook,
                social_twitter = excluded.social_twitter,
                social_instagram = excluded.social_instagram,
                updated_at = excluded.updated_at
            RETURNING site_name, site_description, site_logo, favicon, google_analytics,
                      custom_head_code, custom_footer_code, contact_email, social_facebook,
                      social_twitter, social_instagram, updated_at
            "#,
        )
        .bind(&draft.site_name)
        .bind(&draft.site_description)
        .bind(&draft.site_logo)
        .bind(&draft.favicon)
        .bind(&draft.google_analytics)
        .bind(&draft.custom_head_code)
        .bind(&draft.custom_footer_code)
        .bind(&draft.contact_email)
        .bind(&draft.social_facebook)
        .bind(&draft.social_twitter)
        .bind(&draft.social_instagram)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{connect_in_memory, run_migrations};

    #[tokio::test]
    async fn first_read_creates_defaults() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let settings = SiteSettings::get_or_initialize(&pool).await.unwrap();
        assert_eq!(settings.site_name, DEFAULT_SITE_NAME);
        assert_eq!(settings.site_description.as_deref(), Some(DEFAULT_SITE_DESCRIPTION));

        let again = SiteSettings::get_or_initialize(&pool).await.unwrap();
        assert_eq!(again.updated_at, settings.updated_at);
    }

    #[tokio::test]
    async fn update_replaces_the_single_row() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let draft = SiteSettingsDraft {
            site_name: "Groups Hub".into(),
            contact_email: Some("hello@example.com".into()),
            ..Default::default()
        };
        let updated = SiteSettings::update(&draft, &pool).await.unwrap();
        assert_eq!(updated.site_name, "Groups Hub");
        assert_eq!(updated.site_description, None);

        let read = SiteSettings::get_or_initialize(&pool).await.unwrap();
        assert_eq!(read.site_name, "Groups Hub");
        assert_eq!(read.contact_email.as_deref(), Some("hello@example.com"));
    }
}
