//! Category, country and language administration.

mod common;

use crate::common::*;
use directory_core::common::{CategoryId, DirectoryError};
use directory_core::domains::taxonomy::actions::{
    create_category, create_country, create_language, delete_category, delete_country,
    delete_language, seed_taxonomy, update_category,
};
use directory_core::domains::taxonomy::data::{CategoryInput, CodedTaxonomyInput};
use directory_core::domains::taxonomy::models::{Category, Country, Language};
use test_context::test_context;

fn category_input(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        description: None,
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn seeding_is_idempotent(ctx: &mut TestHarness) {
    let first = seed_taxonomy(&ctx.db_pool).await.unwrap();
    // Germany and English already exist in the harness taxonomy
    assert_eq!(first.categories_created, 28);
    assert_eq!(first.countries_created, 98);
    assert_eq!(first.languages_created, 71);

    let second = seed_taxonomy(&ctx.db_pool).await.unwrap();
    assert_eq!(second.categories_created, 0);
    assert_eq!(second.countries_created, 0);
    assert_eq!(second.languages_created, 0);

    assert_eq!(Category::count(&ctx.db_pool).await.unwrap(), 30);
    assert_eq!(Country::count(&ctx.db_pool).await.unwrap(), 99);
    assert_eq!(Language::count(&ctx.db_pool).await.unwrap(), 72);

    let comedy = Category::find_by_slug("comedy-funny", &ctx.db_pool)
        .await
        .unwrap()
        .expect("seeded category");
    assert_eq!(comedy.name, "Comedy/Funny");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn category_slug_is_derived_once(ctx: &mut TestHarness) {
    let created = create_category(
        &CategoryInput {
            name: "Board Games".to_string(),
            description: Some("Chess and more".to_string()),
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();
    assert_eq!(created.slug, "board-games");

    let updated = update_category(created.id, &category_input("Tabletop Games"), &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(updated.name, "Tabletop Games");
    assert_eq!(updated.slug, "board-games");
    assert!(updated.description.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_names_are_rejected(ctx: &mut TestHarness) {
    let err = create_category(&category_input("Technology"), &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Duplicate { entity: "category", .. }));

    let err = create_country(
        &CodedTaxonomyInput {
            name: "Germany".to_string(),
            code: Some("DE".to_string()),
        },
        &ctx.db_pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DirectoryError::Duplicate { entity: "country", .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn names_need_slug_characters(ctx: &mut TestHarness) {
    let err = create_category(&category_input("??"), &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { field: "name", .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn updating_unknown_category_is_not_found(ctx: &mut TestHarness) {
    let err = update_category(CategoryId::new(), &category_input("Anything"), &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deletes_are_blocked_by_any_listing(ctx: &mut TestHarness) {
    // A rejected listing still counts
    create_rejected_listing(ctx, "Blocker", "Block1", "").await;

    let err = delete_category(ctx.taxonomy.category.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Dependency {
            entity: "category",
            dependents: 1
        }
    ));

    let err = delete_country(ctx.taxonomy.country.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Dependency { entity: "country", .. }));

    let err = delete_language(ctx.taxonomy.language.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Dependency { entity: "language", .. }));

    // Nothing references the second category
    delete_category(ctx.taxonomy.other_category.id, &ctx.db_pool)
        .await
        .unwrap();
    assert!(Category::find_by_id(ctx.taxonomy.other_category.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unused_country_and_language_can_be_deleted(ctx: &mut TestHarness) {
    let country = create_country(
        &CodedTaxonomyInput {
            name: "Iceland".to_string(),
            code: Some("IS".to_string()),
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();
    let language = create_language(
        &CodedTaxonomyInput {
            name: "Icelandic".to_string(),
            code: None,
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();
    assert_eq!(country.code.as_deref(), Some("IS"));
    assert_eq!(language.slug, "icelandic");

    delete_country(country.id, &ctx.db_pool).await.unwrap();
    delete_language(language.id, &ctx.db_pool).await.unwrap();

    let err = delete_country(country.id, &ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn popular_categories_count_approved_listings(ctx: &mut TestHarness) {
    create_approved_listing(ctx, "One", "One1", "").await;
    create_approved_listing(ctx, "Two", "Two1", "").await;
    create_pending_listing(ctx, "Three", "Three1").await;

    let popular = Category::find_popular(8, &ctx.db_pool).await.unwrap();

    assert_eq!(popular[0].category.slug, "technology");
    assert_eq!(popular[0].listing_count, 2);
}
