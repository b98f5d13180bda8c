//! Public submission flow: validate, dedupe, enrich, then persist in one
//! transaction.

use tracing::{debug, info, warn};

use crate::common::utils::{truncate_text, unique_slug, SlugScope};
use crate::common::{CategoryId, CountryId, DirectoryError, DirectoryResult, LanguageId};
use crate::domains::listings::data::SubmitListingInput;
use crate::domains::listings::effects::{enrich, EnrichmentFailure, GroupMetadata};
use crate::domains::listings::invite::extract_invite_code;
use crate::domains::listings::models::{CreateListing, Listing};
use crate::domains::tag::actions::resolve_tags;
use crate::domains::taxonomy::models::{Category, Country, Language};
use crate::kernel::ServerDeps;

const META_DESCRIPTION_LEN: usize = 160;

/// Create a pending listing from a public submission.
pub async fn submit_listing(
    input: &SubmitListingInput,
    deps: &ServerDeps,
) -> DirectoryResult<Listing> {
    let submission = input.validate()?;
    ensure_taxonomy_exists(
        submission.category_id,
        submission.country_id,
        submission.language_id,
        deps,
    )
    .await?;

    if Listing::find_by_invite_link(&submission.invite_link, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(DirectoryError::duplicate("listing", &submission.invite_link));
    }

    // Network I/O happens before the transaction opens.
    let metadata = fetch_metadata(&submission.invite_link, deps).await;

    let meta_title = default_meta_title(&submission.name);
    let meta_description =
        default_meta_description(&submission.name, submission.description.as_deref());
    let invite_code = extract_invite_code(&submission.invite_link);

    let mut tx = deps.db_pool.begin().await?;

    let slug = unique_slug(&mut tx, SlugScope::Listings, &submission.name, None).await?;
    let tags = resolve_tags(&submission.tags, &mut tx).await?;

    let mut create = CreateListing::builder()
        .name(submission.name.clone())
        .slug(slug)
        .description(submission.description.clone())
        .invite_link(submission.invite_link.clone())
        .invite_code(invite_code)
        .category_id(submission.category_id)
        .country_id(submission.country_id)
        .language_id(submission.language_id)
        .meta_title(meta_title)
        .meta_description(meta_description)
        .build();
    if let Some(metadata) = metadata {
        apply_metadata(&mut create, metadata);
    }

    let listing = Listing::create(create, &mut tx)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "listing", &submission.invite_link))?;

    let tag_ids: Vec<_> = tags.iter().map(|t| t.id).collect();
    Listing::replace_tags(listing.id, &tag_ids, &mut tx).await?;

    tx.commit().await?;

    info!(
        listing_id = %listing.id,
        slug = %listing.slug,
        tags = tag_ids.len(),
        "Listing submitted for review"
    );
    Ok(listing)
}

/// Taxonomy references must point at existing rows.
pub(crate) async fn ensure_taxonomy_exists(
    category_id: CategoryId,
    country_id: CountryId,
    language_id: LanguageId,
    deps: &ServerDeps,
) -> DirectoryResult<()> {
    let pool = &deps.db_pool;
    if Category::find_by_id(category_id, pool).await?.is_none() {
        return Err(DirectoryError::validation("category_id", "unknown category"));
    }
    if Country::find_by_id(country_id, pool).await?.is_none() {
        return Err(DirectoryError::validation("country_id", "unknown country"));
    }
    if Language::find_by_id(language_id, pool).await?.is_none() {
        return Err(DirectoryError::validation("language_id", "unknown language"));
    }
    Ok(())
}

/// Run the enricher and swallow its failure.
pub(crate) async fn fetch_metadata(link: &str, deps: &ServerDeps) -> Option<GroupMetadata> {
    match enrich(link, deps.page_fetcher.as_ref(), &deps.enrichment).await {
        Ok(metadata) => Some(metadata),
        Err(EnrichmentFailure::Disabled) => None,
        Err(EnrichmentFailure::Fetch(err)) => {
            warn!(link = %link, error = %err, "Invite page fetch failed");
            None
        }
        Err(failure) => {
            debug!(link = %link, reason = %failure, "No metadata from invite page");
            None
        }
    }
}

fn apply_metadata(create: &mut CreateListing, metadata: GroupMetadata) {
    if let Some(image_url) = metadata.image_url {
        create.image_url = Some(image_url);
    }
    if metadata.member_count > 0 {
        create.member_count = metadata.member_count;
    }
}

pub(crate) fn default_meta_title(name: &str) -> String {
    format!("{} - WhatsApp Group", name)
}

pub(crate) fn default_meta_description(name: &str, description: Option<&str>) -> String {
    match description {
        Some(description) if !description.trim().is_empty() => {
            truncate_text(description, META_DESCRIPTION_LEN)
        }
        _ => format!(
            "Join {} WhatsApp group. Connect with like-minded people and engage in interesting conversations.",
            name
        ),
    }
}
