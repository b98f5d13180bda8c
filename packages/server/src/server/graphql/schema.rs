//! GraphQL schema definition.

use super::context::GraphQLContext;
use super::errors::{directory_error, storage_error};
use juniper::{EmptySubscription, FieldResult, RootNode};
use uuid::Uuid;

// Common types
use crate::common::utils::graphql_int;
use crate::common::{
    BlogPostId, CategoryId, CountryId, LanguageId, ListingId, PageId, TagId,
};

// Domain actions
use crate::domains::content::actions as content_actions;
use crate::domains::listings::actions as listing_actions;
use crate::domains::settings::actions as settings_actions;
use crate::domains::tag::actions as tag_actions;
use crate::domains::taxonomy::actions as taxonomy_actions;

// Domain data types (GraphQL types)
use crate::domains::content::data::{BlogPostData, BlogPostInput, PageData, PageInput};
use crate::domains::listings::data::{
    BulkAction, BulkModerationResult, EditListingInput, ListingConnection, ListingData,
    ListingFilterInput, ListingStatsData, ListingStatusData, SubmitListingInput,
};
use crate::domains::settings::data::{SiteSettingsData, SiteSettingsInput};
use crate::domains::tag::TagData;
use crate::domains::taxonomy::data::{
    CategoryData, CategoryInput, CodedTaxonomyInput, CountryData, LanguageData, SeedSummary,
};

// Domain models (for queries)
use crate::domains::content::models::{BlogPost, Page};
use crate::domains::listings::models::{Listing, ListingStatus};
use crate::domains::settings::models::SiteSettings;
use crate::domains::tag::Tag;
use crate::domains::taxonomy::models::{Category, Country, Language};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;
const POPULAR_CATEGORIES_LIMIT: i64 = 8;
const POPULAR_TAGS_LIMIT: i64 = 15;
const TAG_SUGGESTIONS_LIMIT: i64 = 50;
const RELATED_LISTINGS_LIMIT: i64 = 6;

/// Clamp client-supplied paging to sane bounds.
fn page_bounds(limit: Option<i32>, offset: Option<i32>) -> (i64, i64) {
    let limit = limit
        .map(i64::from)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = offset.map(i64::from).unwrap_or(0).max(0);
    (limit, offset)
}

fn clamp_limit(limit: Option<i32>, max: i64) -> i64 {
    limit.map(i64::from).unwrap_or(max).clamp(1, max)
}

/// Admin dashboard counters
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct DashboardStats {
    pub listings: ListingStatsData,
    pub categories: i32,
    pub countries: i32,
    pub languages: i32,
    pub tags: i32,
    pub pages: i32,
    pub blog_posts: i32,
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Listing Queries
    // =========================================================================

    /// Approved listings, featured first then newest
    async fn listings(
        ctx: &GraphQLContext,
        filter: Option<ListingFilterInput>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<ListingConnection> {
        let (limit, offset) = page_bounds(limit, offset);
        let filter = filter.unwrap_or_default().into();

        let (listings, total) = Listing::search_approved(&filter, limit, offset, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(ListingConnection::new(listings, total, offset))
    }

    /// Approved listing by slug, optionally scoped to a category slug
    async fn listing(
        ctx: &GraphQLContext,
        slug: String,
        category_slug: Option<String>,
    ) -> FieldResult<Option<ListingData>> {
        let listing = Listing::find_approved_by_slug(&slug, category_slug.as_deref(), &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(listing.map(ListingData::from))
    }

    /// Listing behind an invite code. Non-admins only see approved listings.
    async fn listing_by_invite_code(
        ctx: &GraphQLContext,
        invite_code: String,
    ) -> FieldResult<Option<ListingData>> {
        let listing = Listing::find_by_invite_code(&invite_code, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(listing
            .filter(|l| ctx.is_admin || l.status == ListingStatus::Approved)
            .map(ListingData::from))
    }

    async fn related_listings(
        ctx: &GraphQLContext,
        listing_id: Uuid,
        limit: Option<i32>,
    ) -> FieldResult<Vec<ListingData>> {
        let Some(listing) = Listing::find_by_id(ListingId::from_uuid(listing_id), &ctx.db_pool)
            .await
            .map_err(storage_error)?
        else {
            return Ok(vec![]);
        };

        let related = listing
            .find_related(clamp_limit(limit, RELATED_LISTINGS_LIMIT), &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(related.into_iter().map(ListingData::from).collect())
    }

    // =========================================================================
    // Taxonomy & Tag Queries
    // =========================================================================

    async fn categories(ctx: &GraphQLContext) -> FieldResult<Vec<CategoryData>> {
        let categories = Category::find_all(&ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(categories.into_iter().map(CategoryData::from).collect())
    }

    /// Categories with the most approved listings
    async fn popular_categories(ctx: &GraphQLContext) -> FieldResult<Vec<CategoryData>> {
        let categories = Category::find_popular(POPULAR_CATEGORIES_LIMIT, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(categories.into_iter().map(CategoryData::from).collect())
    }

    async fn countries(ctx: &GraphQLContext) -> FieldResult<Vec<CountryData>> {
        let countries = Country::find_all(&ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(countries.into_iter().map(CountryData::from).collect())
    }

    async fn languages(ctx: &GraphQLContext) -> FieldResult<Vec<LanguageData>> {
        let languages = Language::find_all(&ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(languages.into_iter().map(LanguageData::from).collect())
    }

    async fn tags(ctx: &GraphQLContext, search: Option<String>) -> FieldResult<Vec<TagData>> {
        let search = search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let tags = Tag::find_all(search, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(tags.into_iter().map(TagData::from).collect())
    }

    /// Tag names for submit-form autocompletion
    async fn tag_suggestions(ctx: &GraphQLContext) -> FieldResult<Vec<String>> {
        Tag::suggestions(TAG_SUGGESTIONS_LIMIT, &ctx.db_pool)
            .await
            .map_err(storage_error)
    }

    async fn popular_tags(ctx: &GraphQLContext) -> FieldResult<Vec<TagData>> {
        let tags = Tag::find_popular(POPULAR_TAGS_LIMIT, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(tags.into_iter().map(TagData::from).collect())
    }

    // =========================================================================
    // Content Queries
    // =========================================================================

    /// Published page by slug
    async fn page(ctx: &GraphQLContext, slug: String) -> FieldResult<Option<PageData>> {
        let page = Page::find_published_by_slug(&slug, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(page.map(PageData::from))
    }

    async fn blog_posts(
        ctx: &GraphQLContext,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<Vec<BlogPostData>> {
        let (limit, offset) = page_bounds(limit, offset);
        let posts = BlogPost::find_published(limit, offset, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(posts.into_iter().map(BlogPostData::from).collect())
    }

    async fn blog_post(ctx: &GraphQLContext, slug: String) -> FieldResult<Option<BlogPostData>> {
        let post = BlogPost::find_published_by_slug(&slug, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(post.map(BlogPostData::from))
    }

    async fn site_settings(ctx: &GraphQLContext) -> FieldResult<SiteSettingsData> {
        let settings = SiteSettings::get_or_initialize(&ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(settings.into())
    }

    // =========================================================================
    // Admin Queries
    // =========================================================================

    /// Every listing regardless of status, newest first (admin only)
    async fn admin_listings(
        ctx: &GraphQLContext,
        status: Option<ListingStatusData>,
        search: Option<String>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<ListingConnection> {
        ctx.require_admin()?;
        let (limit, offset) = page_bounds(limit, offset);
        let search = search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let (listings, total) = Listing::search_admin(
            status.map(ListingStatus::from),
            search,
            limit,
            offset,
            &ctx.db_pool,
        )
        .await
        .map_err(storage_error)?;
        Ok(ListingConnection::new(listings, total, offset))
    }

    async fn admin_listing(ctx: &GraphQLContext, id: Uuid) -> FieldResult<Option<ListingData>> {
        ctx.require_admin()?;
        let listing = Listing::find_by_id(ListingId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(listing.map(ListingData::from))
    }

    /// Dashboard counters (admin only)
    async fn listing_stats(ctx: &GraphQLContext) -> FieldResult<DashboardStats> {
        ctx.require_admin()?;
        let pool = &ctx.db_pool;

        let listings = Listing::stats(pool).await.map_err(storage_error)?;
        Ok(DashboardStats {
            listings: listings.into(),
            categories: graphql_int(Category::count(pool).await.map_err(storage_error)?),
            countries: graphql_int(Country::count(pool).await.map_err(storage_error)?),
            languages: graphql_int(Language::count(pool).await.map_err(storage_error)?),
            tags: graphql_int(Tag::count(pool).await.map_err(storage_error)?),
            pages: graphql_int(Page::count(pool).await.map_err(storage_error)?),
            blog_posts: graphql_int(BlogPost::count(pool).await.map_err(storage_error)?),
        })
    }

    /// All pages including unpublished drafts (admin only)
    async fn admin_pages(ctx: &GraphQLContext) -> FieldResult<Vec<PageData>> {
        ctx.require_admin()?;
        let pages = Page::find_all(&ctx.db_pool).await.map_err(storage_error)?;
        Ok(pages.into_iter().map(PageData::from).collect())
    }

    async fn admin_blog_posts(ctx: &GraphQLContext) -> FieldResult<Vec<BlogPostData>> {
        ctx.require_admin()?;
        let posts = BlogPost::find_all(&ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(posts.into_iter().map(BlogPostData::from).collect())
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Listing Mutations
    // =========================================================================

    /// Submit a group for review (public)
    async fn submit_listing(
        ctx: &GraphQLContext,
        input: SubmitListingInput,
    ) -> FieldResult<ListingData> {
        let listing = listing_actions::submit_listing(&input, ctx.deps())
            .await
            .map_err(directory_error)?;
        Ok(listing.into())
    }

    async fn edit_listing(
        ctx: &GraphQLContext,
        id: Uuid,
        input: EditListingInput,
    ) -> FieldResult<ListingData> {
        ctx.require_admin()?;
        let listing = listing_actions::edit_listing(ListingId::from_uuid(id), &input, ctx.deps())
            .await
            .map_err(directory_error)?;
        Ok(listing.into())
    }

    async fn bulk_moderate_listings(
        ctx: &GraphQLContext,
        action: BulkAction,
        ids: Vec<Uuid>,
    ) -> FieldResult<BulkModerationResult> {
        ctx.require_admin()?;
        let ids: Vec<ListingId> = ids.into_iter().map(ListingId::from_uuid).collect();
        let affected = listing_actions::bulk_moderate(action, &ids, &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(BulkModerationResult {
            action,
            affected_count: graphql_int(affected),
        })
    }

    /// Re-check the invite link; true when it answered with 2xx
    async fn verify_listing(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        listing_actions::verify_listing(ListingId::from_uuid(id), ctx.deps())
            .await
            .map_err(directory_error)
    }

    // =========================================================================
    // Tag Mutations
    // =========================================================================

    /// Returns the number of tags updated
    async fn recompute_tag_usage_counts(ctx: &GraphQLContext) -> FieldResult<i32> {
        ctx.require_admin()?;
        let updated = tag_actions::recompute_tag_usage_counts(&ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(graphql_int(updated))
    }

    /// Returns the number of tags deleted
    async fn delete_unused_tags(ctx: &GraphQLContext) -> FieldResult<i32> {
        ctx.require_admin()?;
        let deleted = tag_actions::delete_unused_tags(&ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(graphql_int(deleted))
    }

    async fn delete_tag(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        tag_actions::delete_tag(TagId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(true)
    }

    // =========================================================================
    // Taxonomy Mutations
    // =========================================================================

    async fn create_category(
        ctx: &GraphQLContext,
        input: CategoryInput,
    ) -> FieldResult<CategoryData> {
        ctx.require_admin()?;
        Ok(taxonomy_actions::create_category(&input, &ctx.db_pool)
            .await
            .map_err(directory_error)?
            .into())
    }

    async fn update_category(
        ctx: &GraphQLContext,
        id: Uuid,
        input: CategoryInput,
    ) -> FieldResult<CategoryData> {
        ctx.require_admin()?;
        Ok(
            taxonomy_actions::update_category(CategoryId::from_uuid(id), &input, &ctx.db_pool)
                .await
                .map_err(directory_error)?
                .into(),
        )
    }

    async fn delete_category(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        taxonomy_actions::delete_category(CategoryId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(true)
    }

    async fn create_country(
        ctx: &GraphQLContext,
        input: CodedTaxonomyInput,
    ) -> FieldResult<CountryData> {
        ctx.require_admin()?;
        Ok(taxonomy_actions::create_country(&input, &ctx.db_pool)
            .await
            .map_err(directory_error)?
            .into())
    }

    async fn delete_country(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        taxonomy_actions::delete_country(CountryId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(true)
    }

    async fn create_language(
        ctx: &GraphQLContext,
        input: CodedTaxonomyInput,
    ) -> FieldResult<LanguageData> {
        ctx.require_admin()?;
        Ok(taxonomy_actions::create_language(&input, &ctx.db_pool)
            .await
            .map_err(directory_error)?
            .into())
    }

    async fn delete_language(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        taxonomy_actions::delete_language(LanguageId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(true)
    }

    /// Insert the default categories, countries and languages (idempotent)
    async fn seed_taxonomy(ctx: &GraphQLContext) -> FieldResult<SeedSummary> {
        ctx.require_admin()?;
        taxonomy_actions::seed_taxonomy(&ctx.db_pool)
            .await
            .map_err(directory_error)
    }

    // =========================================================================
    // Content Mutations
    // =========================================================================

    async fn create_page(ctx: &GraphQLContext, input: PageInput) -> FieldResult<PageData> {
        ctx.require_admin()?;
        Ok(content_actions::create_page(&input, &ctx.db_pool)
            .await
            .map_err(directory_error)?
            .into())
    }

    async fn update_page(
        ctx: &GraphQLContext,
        id: Uuid,
        input: PageInput,
    ) -> FieldResult<PageData> {
        ctx.require_admin()?;
        Ok(
            content_actions::update_page(PageId::from_uuid(id), &input, &ctx.db_pool)
                .await
                .map_err(directory_error)?
                .into(),
        )
    }

    async fn delete_page(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        content_actions::delete_page(PageId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(true)
    }

    async fn create_blog_post(
        ctx: &GraphQLContext,
        input: BlogPostInput,
    ) -> FieldResult<BlogPostData> {
        ctx.require_admin()?;
        Ok(content_actions::create_blog_post(&input, &ctx.db_pool)
            .await
            .map_err(directory_error)?
            .into())
    }

    async fn update_blog_post(
        ctx: &GraphQLContext,
        id: Uuid,
        input: BlogPostInput,
    ) -> FieldResult<BlogPostData> {
        ctx.require_admin()?;
        Ok(
            content_actions::update_blog_post(BlogPostId::from_uuid(id), &input, &ctx.db_pool)
                .await
                .map_err(directory_error)?
                .into(),
        )
    }

    async fn delete_blog_post(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        ctx.require_admin()?;
        content_actions::delete_blog_post(BlogPostId::from_uuid(id), &ctx.db_pool)
            .await
            .map_err(directory_error)?;
        Ok(true)
    }

    // =========================================================================
    // Settings Mutations
    // =========================================================================

    async fn update_site_settings(
        ctx: &GraphQLContext,
        input: SiteSettingsInput,
    ) -> FieldResult<SiteSettingsData> {
        ctx.require_admin()?;
        Ok(settings_actions::update_site_settings(&input, &ctx.db_pool)
            .await
            .map_err(directory_error)?
            .into())
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_clamp_client_values() {
        assert_eq!(page_bounds(None, None), (20, 0));
        assert_eq!(page_bounds(Some(500), Some(-3)), (100, 0));
        assert_eq!(page_bounds(Some(0), Some(40)), (1, 40));
    }

    #[test]
    fn limits_never_exceed_their_cap() {
        assert_eq!(clamp_limit(None, RELATED_LISTINGS_LIMIT), 6);
        assert_eq!(clamp_limit(Some(50), RELATED_LISTINGS_LIMIT), 6);
        assert_eq!(clamp_limit(Some(2), RELATED_LISTINGS_LIMIT), 2);
    }
}
