//! Admin CRUD for categories, countries and languages.
//!
//! Deletes are refused while any listing, whatever its status, still points
//! at the entity.

use sqlx::SqlitePool;
use tracing::info;

use crate::common::{CategoryId, CountryId, DirectoryError, DirectoryResult, LanguageId};
use crate::domains::taxonomy::data::{CategoryInput, CodedTaxonomyInput};
use crate::domains::taxonomy::models::{Category, Country, Language};

pub async fn create_category(input: &CategoryInput, pool: &SqlitePool) -> DirectoryResult<Category> {
    let (name, description) = input.validate()?;
    let mut conn = pool.acquire().await?;

    let category = Category::create(&name.name, &name.slug, description.as_deref(), &mut conn)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "category", &name.name))?;

    info!(category_id = %category.id, slug = %category.slug, "Created category");
    Ok(category)
}

pub async fn update_category(
    id: CategoryId,
    input: &CategoryInput,
    pool: &SqlitePool,
) -> DirectoryResult<Category> {
    let (name, description) = input.validate()?;
    let mut conn = pool.acquire().await?;

    Category::update(id, &name.name, description.as_deref(), &mut conn)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "category", &name.name))?
        .ok_or_else(|| DirectoryError::not_found("category", id))
}

pub async fn delete_category(id: CategoryId, pool: &SqlitePool) -> DirectoryResult<()> {
    let mut tx = pool.begin().await?;

    let dependents = Category::count_listings(id, &mut tx).await?;
    if dependents > 0 {
        return Err(DirectoryError::Dependency {
            entity: "category",
            dependents,
        });
    }
    if !Category::delete(id, &mut tx).await? {
        return Err(DirectoryError::not_found("category", id));
    }

    tx.commit().await?;
    info!(category_id = %id, "Deleted category");
    Ok(())
}

pub async fn create_country(input: &CodedTaxonomyInput, pool: &SqlitePool) -> DirectoryResult<Country> {
    let (name, code) = input.validate()?;
    let mut conn = pool.acquire().await?;

    let country = Country::create(&name.name, &name.slug, code.as_deref(), &mut conn)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "country", &name.name))?;

    info!(country_id = %country.id, slug = %country.slug, "Created country");
    Ok(country)
}

pub async fn delete_country(id: CountryId, pool: &SqlitePool) -> DirectoryResult<()> {
    let mut tx = pool.begin().await?;

    let dependents = Country::count_listings(id, &mut tx).await?;
    if dependents > 0 {
        return Err(DirectoryError::Dependency {
            entity: "country",
            dependents,
        });
    }
    if !Country::delete(id, &mut tx).await? {
        return Err(DirectoryError::not_found("country", id));
    }

    tx.commit().await?;
    info!(country_id = %id, "Deleted country");
    Ok(())
}

pub async fn create_language(
    input: &CodedTaxonomyInput,
    pool: &SqlitePool,
) -> DirectoryResult<Language> {
    let (name, code) = input.validate()?;
    let mut conn = pool.acquire().await?;

    let language = Language::create(&name.name, &name.slug, code.as_deref(), &mut conn)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "language", &name.name))?;

    info!(language_id = %language.id, slug = %language.slug, "Created language");
    Ok(language)
}

pub async fn delete_language(id: LanguageId, pool: &SqlitePool) -> DirectoryResult<()> {
    let mut tx = pool.begin().await?;

    let dependents = Language::count_listings(id, &mut tx).await?;
    if dependents > 0 {
        return Err(DirectoryError::Dependency {
            entity: "language",
            dependents,
        });
    }
    if !Language::delete(id, &mut tx).await? {
        return Err(DirectoryError::not_found("language", id));
    }

    tx.commit().await?;
    info!(language_id = %id, "Deleted language");
    Ok(())
}
