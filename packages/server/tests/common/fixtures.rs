//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods and actions directly.

use anyhow::Result;
use directory_core::domains::listings::actions::{approve, reject, submit_listing};
use directory_core::domains::listings::data::SubmitListingInput;
use directory_core::domains::listings::models::Listing;
use directory_core::domains::taxonomy::models::{Category, Country, Language};
use sqlx::SqlitePool;

use super::TestHarness;

/// Invite page carrying every field the enricher reads.
pub const INVITE_PAGE: &str = r#"
<html>
  <head>
    <title>Crypto Traders</title>
    <meta property="og:description" content="Daily market talk">
    <meta property="og:image" content="https://pps.whatsapp.net/v/t61/group.jpg">
  </head>
  <body><p>Group chat</p><span>245 members</span></body>
</html>
"#;

/// Minimal taxonomy inserted into every harness.
pub struct TestTaxonomy {
    pub category: Category,
    pub other_category: Category,
    pub country: Country,
    pub language: Language,
}

pub async fn create_taxonomy(pool: &SqlitePool) -> Result<TestTaxonomy> {
    let mut conn = pool.acquire().await?;
    let category = Category::create("Technology", "technology", None, &mut conn).await?;
    let other_category = Category::create("Music", "music", Some("Bands and fans"), &mut conn).await?;
    let country = Country::create("Germany", "germany", Some("DE"), &mut conn).await?;
    let language = Language::create("English", "english", Some("en"), &mut conn).await?;

    Ok(TestTaxonomy {
        category,
        other_category,
        country,
        language,
    })
}

/// Link with a unique code derived from `code`.
pub fn invite_link(code: &str) -> String {
    format!("https://chat.whatsapp.com/{}", code)
}

/// Submission in the harness's default category.
pub fn submission(harness: &TestHarness, name: &str, code: &str) -> SubmitListingInput {
    SubmitListingInput {
        name: name.to_string(),
        description: None,
        invite_link: invite_link(code),
        category_id: harness.taxonomy.category.id.into_uuid(),
        country_id: harness.taxonomy.country.id.into_uuid(),
        language_id: harness.taxonomy.language.id.into_uuid(),
        tags: None,
    }
}

pub fn submission_with_tags(
    harness: &TestHarness,
    name: &str,
    code: &str,
    tags: &str,
) -> SubmitListingInput {
    SubmitListingInput {
        tags: Some(tags.to_string()),
        ..submission(harness, name, code)
    }
}

/// Submit a pending listing.
pub async fn create_pending_listing(harness: &TestHarness, name: &str, code: &str) -> Listing {
    submit_listing(&submission(harness, name, code), &harness.deps)
        .await
        .expect("submission failed")
}

/// Submit a listing with tags and approve it.
pub async fn create_approved_listing(
    harness: &TestHarness,
    name: &str,
    code: &str,
    tags: &str,
) -> Listing {
    let listing = submit_listing(&submission_with_tags(harness, name, code, tags), &harness.deps)
        .await
        .expect("submission failed");
    approve(&[listing.id], &harness.db_pool)
        .await
        .expect("approve failed");
    reload(harness, &listing).await
}

/// Submit a listing with tags and reject it.
pub async fn create_rejected_listing(
    harness: &TestHarness,
    name: &str,
    code: &str,
    tags: &str,
) -> Listing {
    let listing = submit_listing(&submission_with_tags(harness, name, code, tags), &harness.deps)
        .await
        .expect("submission failed");
    reject(&[listing.id], &harness.db_pool)
        .await
        .expect("reject failed");
    reload(harness, &listing).await
}

pub async fn reload(harness: &TestHarness, listing: &Listing) -> Listing {
    Listing::find_by_id(listing.id, &harness.db_pool)
        .await
        .expect("listing lookup failed")
        .expect("listing disappeared")
}
