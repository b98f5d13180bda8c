//! Admin moderation: bulk status/feature/delete, full edits and link checks.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::common::utils::{unique_slug, SlugScope};
use crate::common::{DirectoryError, DirectoryResult, ListingId};
use crate::domains::listings::actions::submit::{ensure_taxonomy_exists, fetch_metadata};
use crate::domains::listings::data::{BulkAction, EditListingInput};
use crate::domains::listings::invite::extract_invite_code;
use crate::domains::listings::models::{Listing, ListingStatus, UpdateListing};
use crate::domains::tag::actions::resolve_tags;
use crate::kernel::ServerDeps;

/// Apply one moderation verb to a set of listings in a single transaction.
///
/// Returns how many of the ids matched a listing. Unknown ids are skipped;
/// a storage failure rolls the whole batch back.
pub async fn bulk_moderate(
    action: BulkAction,
    ids: &[ListingId],
    pool: &SqlitePool,
) -> DirectoryResult<u64> {
    if ids.is_empty() {
        return Err(DirectoryError::validation("ids", "at least one listing id is required"));
    }

    let mut ids = ids.to_vec();
    ids.sort();
    ids.dedup();

    let mut tx = pool.begin().await?;
    let affected = match action {
        BulkAction::Approve => {
            Listing::set_status_many(&ids, ListingStatus::Approved, &mut tx).await?
        }
        BulkAction::Reject => {
            Listing::set_status_many(&ids, ListingStatus::Rejected, &mut tx).await?
        }
        BulkAction::Feature => Listing::set_featured_many(&ids, true, &mut tx).await?,
        BulkAction::Unfeature => Listing::set_featured_many(&ids, false, &mut tx).await?,
        BulkAction::Delete => Listing::delete_many(&ids, &mut tx).await?,
    };
    tx.commit().await?;

    info!(
        action = %action,
        requested = ids.len(),
        affected,
        "Bulk moderation applied"
    );
    Ok(affected)
}

pub async fn approve(ids: &[ListingId], pool: &SqlitePool) -> DirectoryResult<u64> {
    bulk_moderate(BulkAction::Approve, ids, pool).await
}

pub async fn reject(ids: &[ListingId], pool: &SqlitePool) -> DirectoryResult<u64> {
    bulk_moderate(BulkAction::Reject, ids, pool).await
}

pub async fn feature(ids: &[ListingId], pool: &SqlitePool) -> DirectoryResult<u64> {
    bulk_moderate(BulkAction::Feature, ids, pool).await
}

pub async fn unfeature(ids: &[ListingId], pool: &SqlitePool) -> DirectoryResult<u64> {
    bulk_moderate(BulkAction::Unfeature, ids, pool).await
}

pub async fn delete(ids: &[ListingId], pool: &SqlitePool) -> DirectoryResult<u64> {
    bulk_moderate(BulkAction::Delete, ids, pool).await
}

/// Replace every admin-editable field of a listing.
///
/// The slug is regenerated only when the name changes. A changed link gets a
/// fresh invite code and one enrichment pass that may update the image.
pub async fn edit_listing(
    id: ListingId,
    input: &EditListingInput,
    deps: &ServerDeps,
) -> DirectoryResult<Listing> {
    let edit = input.validate()?;
    let pool = &deps.db_pool;

    let existing = Listing::find_by_id(id, pool)
        .await?
        .ok_or_else(|| DirectoryError::not_found("listing", id))?;

    ensure_taxonomy_exists(edit.category_id, edit.country_id, edit.language_id, deps).await?;

    let link_changed = edit.invite_link != existing.invite_link;
    let mut image_url = existing.image_url.clone();

    if link_changed {
        if let Some(other) = Listing::find_by_invite_link(&edit.invite_link, pool).await? {
            if other.id != id {
                return Err(DirectoryError::duplicate("listing", &edit.invite_link));
            }
        }
        if let Some(metadata) = fetch_metadata(&edit.invite_link, deps).await {
            if metadata.image_url.is_some() {
                image_url = metadata.image_url;
            }
        }
    }

    let mut tx = pool.begin().await?;

    let slug = if edit.name != existing.name {
        unique_slug(&mut tx, SlugScope::Listings, &edit.name, Some(id.into_uuid())).await?
    } else {
        existing.slug.clone()
    };
    let tags = resolve_tags(&edit.tags, &mut tx).await?;

    let update = UpdateListing::builder()
        .name(edit.name)
        .slug(slug)
        .description(edit.description)
        .invite_code(extract_invite_code(&edit.invite_link))
        .invite_link(edit.invite_link.clone())
        .image_url(image_url)
        .category_id(edit.category_id)
        .country_id(edit.country_id)
        .language_id(edit.language_id)
        .status(edit.status)
        .featured(edit.featured)
        .admin_notes(edit.admin_notes)
        .meta_title(edit.meta_title)
        .meta_description(edit.meta_description)
        .build();

    let listing = Listing::update(id, update, &mut tx)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "listing", &edit.invite_link))?
        .ok_or_else(|| DirectoryError::not_found("listing", id))?;

    let tag_ids: Vec<_> = tags.iter().map(|t| t.id).collect();
    Listing::replace_tags(id, &tag_ids, &mut tx).await?;

    tx.commit().await?;

    info!(
        listing_id = %id,
        status = %listing.status,
        link_changed,
        "Listing edited"
    );
    Ok(listing)
}

/// Check that the invite link still answers and stamp `last_verified`.
///
/// Returns false when the page could not be fetched or did not return 2xx.
pub async fn verify_listing(id: ListingId, deps: &ServerDeps) -> DirectoryResult<bool> {
    let listing = Listing::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or_else(|| DirectoryError::not_found("listing", id))?;

    let timeout = deps.enrichment.timeout;
    let reachable = match tokio::time::timeout(
        timeout,
        deps.page_fetcher.fetch(&listing.invite_link, timeout),
    )
    .await
    {
        Ok(Ok(page)) => page.is_success(),
        Ok(Err(err)) => {
            warn!(listing_id = %id, error = %err, "Invite link check failed");
            false
        }
        Err(_) => {
            warn!(listing_id = %id, "Invite link check timed out");
            false
        }
    };

    if reachable {
        Listing::mark_verified(id, &deps.db_pool).await?;
        info!(listing_id = %id, "Listing verified");
    }
    Ok(reachable)
}
