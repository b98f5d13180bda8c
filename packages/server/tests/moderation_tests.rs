//! Admin moderation: bulk verbs, full edits and link verification.

mod common;

use crate::common::*;
use directory_core::common::{DirectoryError, ListingId};
use directory_core::domains::listings::actions::{
    bulk_moderate, delete, edit_listing, feature, verify_listing,
};
use directory_core::domains::listings::data::{BulkAction, EditListingInput, ListingStatusData};
use directory_core::domains::listings::models::{Listing, ListingStatus};
use directory_core::domains::tag::Tag;
use directory_core::kernel::MockPageFetcher;
use test_context::test_context;

/// Edit input that keeps every field of `listing` as it is.
fn unchanged(listing: &Listing) -> EditListingInput {
    EditListingInput {
        name: listing.name.clone(),
        description: listing.description.clone(),
        invite_link: listing.invite_link.clone(),
        category_id: listing.category_id.into_uuid(),
        country_id: listing.country_id.into_uuid(),
        language_id: listing.language_id.into_uuid(),
        status: listing.status.into(),
        featured: listing.featured,
        admin_notes: listing.admin_notes.clone(),
        meta_title: listing.meta_title.clone(),
        meta_description: listing.meta_description.clone(),
        tags: None,
    }
}

// ============================================================================
// Bulk moderation
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn bulk_approve_counts_only_existing_ids(ctx: &mut TestHarness) {
    let a = create_pending_listing(ctx, "Alpha", "Alpha1").await;
    let b = create_pending_listing(ctx, "Beta", "Beta1").await;
    let c = create_rejected_listing(ctx, "Gamma", "Gamma1", "").await;
    let d = create_approved_listing(ctx, "Delta", "Delta1", "").await;

    let affected = bulk_moderate(
        BulkAction::Approve,
        &[a.id, b.id, c.id, d.id, ListingId::new(), a.id],
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Already-approved listings still count as processed
    assert_eq!(affected, 4);
    for listing in [&a, &b, &c, &d] {
        assert_eq!(reload(ctx, listing).await.status, ListingStatus::Approved);
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn bulk_feature_and_unfeature(ctx: &mut TestHarness) {
    let a = create_approved_listing(ctx, "Alpha", "Alpha1", "").await;
    let b = create_approved_listing(ctx, "Beta", "Beta1", "").await;

    assert_eq!(feature(&[a.id, b.id], &ctx.db_pool).await.unwrap(), 2);
    assert!(reload(ctx, &a).await.featured);

    let affected = bulk_moderate(BulkAction::Unfeature, &[a.id], &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(affected, 1);
    assert!(!reload(ctx, &a).await.featured);
    assert!(reload(ctx, &b).await.featured);

    let stats = Listing::stats(&ctx.db_pool).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.approved, 2);
    assert_eq!(stats.featured, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn bulk_delete_removes_tag_links(ctx: &mut TestHarness) {
    let a = create_approved_listing(ctx, "Alpha", "Alpha1", "news, sport").await;
    let b = create_pending_listing(ctx, "Beta", "Beta1").await;

    assert_eq!(delete(&[a.id], &ctx.db_pool).await.unwrap(), 1);

    assert!(Listing::find_by_id(a.id, &ctx.db_pool).await.unwrap().is_none());
    assert!(Listing::find_by_id(b.id, &ctx.db_pool).await.unwrap().is_some());
    assert_eq!(ctx.count("listing_tags").await, 0);
    // Tags outlive their listings until the cleanup sweep
    assert_eq!(ctx.count("tags").await, 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn bulk_moderation_requires_ids(ctx: &mut TestHarness) {
    let err = bulk_moderate(BulkAction::Reject, &[], &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { field: "ids", .. }));
}

// ============================================================================
// Edit
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn rename_regenerates_slug(ctx: &mut TestHarness) {
    let listing = create_pending_listing(ctx, "Old Name", "Edit1").await;
    create_pending_listing(ctx, "New Name", "Edit2").await;

    let input = EditListingInput {
        name: "New Name".to_string(),
        ..unchanged(&listing)
    };
    let edited = edit_listing(listing.id, &input, &ctx.deps).await.unwrap();

    assert_eq!(edited.name, "New Name");
    assert_eq!(edited.slug, "new-name-1");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unchanged_name_keeps_slug(ctx: &mut TestHarness) {
    let listing = create_pending_listing(ctx, "Stable", "Edit1").await;

    let input = EditListingInput {
        status: ListingStatusData::Approved,
        featured: true,
        admin_notes: Some("Checked by hand".to_string()),
        meta_title: Some("  ".to_string()),
        ..unchanged(&listing)
    };
    let edited = edit_listing(listing.id, &input, &ctx.deps).await.unwrap();

    assert_eq!(edited.slug, "stable");
    assert_eq!(edited.status, ListingStatus::Approved);
    assert!(edited.featured);
    assert_eq!(edited.admin_notes.as_deref(), Some("Checked by hand"));
    assert!(edited.meta_title.is_none());
}

#[tokio::test]
async fn changed_link_updates_code_and_image() {
    let ctx = TestHarness::with_fetcher(
        MockPageFetcher::new()
            .with_error("first submission not enriched")
            .with_html(INVITE_PAGE),
    )
    .await
    .unwrap();
    let listing = create_pending_listing(&ctx, "Mover", "OldCode1").await;
    assert!(listing.image_url.is_none());

    let input = EditListingInput {
        invite_link: invite_link("NewCode1"),
        ..unchanged(&listing)
    };
    let edited = edit_listing(listing.id, &input, &ctx.deps).await.unwrap();

    assert_eq!(edited.invite_code, "NewCode1");
    assert_eq!(
        edited.image_url.as_deref(),
        Some("https://pps.whatsapp.net/v/t61/group.jpg")
    );
    // Member count only comes from submission
    assert_eq!(edited.member_count, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn link_taken_by_another_listing_is_a_duplicate(ctx: &mut TestHarness) {
    let listing = create_pending_listing(ctx, "Mine", "Mine1").await;
    create_pending_listing(ctx, "Theirs", "Theirs1").await;

    let input = EditListingInput {
        invite_link: invite_link("Theirs1"),
        ..unchanged(&listing)
    };
    let err = edit_listing(listing.id, &input, &ctx.deps).await.unwrap_err();

    assert!(matches!(err, DirectoryError::Duplicate { .. }));
    assert_eq!(reload(ctx, &listing).await.invite_code, "Mine1");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn editing_missing_listing_is_not_found(ctx: &mut TestHarness) {
    let listing = create_pending_listing(ctx, "Ghost", "Ghost1").await;
    let input = unchanged(&listing);

    let err = edit_listing(ListingId::new(), &input, &ctx.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { entity: "listing", .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn edit_replaces_and_clears_tags(ctx: &mut TestHarness) {
    let listing = create_approved_listing(ctx, "Tagged", "Tagged1", "one, two").await;

    let input = EditListingInput {
        tags: Some("three, One".to_string()),
        ..unchanged(&listing)
    };
    edit_listing(listing.id, &input, &ctx.deps).await.unwrap();

    let tags = Tag::find_for_listing(listing.id, &ctx.db_pool).await.unwrap();
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["three", "one"]);

    let input = EditListingInput {
        tags: Some(String::new()),
        ..unchanged(&listing)
    };
    edit_listing(listing.id, &input, &ctx.deps).await.unwrap();
    assert!(Tag::find_for_listing(listing.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn edit_validates_link(ctx: &mut TestHarness) {
    let listing = create_pending_listing(ctx, "Strict", "Strict1").await;
    let input = EditListingInput {
        invite_link: "https://chat.whatsapp.com/bad-code".to_string(),
        ..unchanged(&listing)
    };

    let err = edit_listing(listing.id, &input, &ctx.deps).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { field: "invite_link", .. }));
}

// ============================================================================
// Verification
// ============================================================================

#[tokio::test]
async fn reachable_link_is_stamped_verified() {
    // First response is consumed by enrichment on submission
    let ctx = TestHarness::with_fetcher(
        MockPageFetcher::new()
            .with_error("submission")
            .with_html("<html>ok</html>"),
    )
    .await
    .unwrap();
    let listing = create_pending_listing(&ctx, "Alive", "Alive1").await;

    assert!(verify_listing(listing.id, &ctx.deps).await.unwrap());
    assert!(reload(&ctx, &listing).await.last_verified.is_some());
    assert_eq!(ctx.fetcher.calls().len(), 2);
}

#[tokio::test]
async fn unreachable_link_is_not_verified() {
    let ctx = TestHarness::with_fetcher(
        MockPageFetcher::new()
            .with_error("submission")
            .with_status(404, "gone"),
    )
    .await
    .unwrap();
    let listing = create_pending_listing(&ctx, "Dead", "Dead1").await;

    assert!(!verify_listing(listing.id, &ctx.deps).await.unwrap());
    assert!(reload(&ctx, &listing).await.last_verified.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn verifying_missing_listing_is_not_found(ctx: &mut TestHarness) {
    let err = verify_listing(ListingId::new(), &ctx.deps).await.unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { .. }));
}
