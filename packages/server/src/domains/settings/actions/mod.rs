use sqlx::SqlitePool;
use tracing::info;

use crate::common::DirectoryResult;
use crate::domains::settings::data::SiteSettingsInput;
use crate::domains::settings::models::SiteSettings;

pub async fn update_site_settings(
    input: &SiteSettingsInput,
    pool: &SqlitePool,
) -> DirectoryResult<SiteSettings> {
    let draft = input.validate()?;
    let settings = SiteSettings::update(&draft, pool).await?;
    info!(site_name = %settings.site_name, "Updated site settings");
    Ok(settings)
}
