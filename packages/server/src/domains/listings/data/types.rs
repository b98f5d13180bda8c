use chrono::{DateTime, Utc};
use juniper::{FieldResult, GraphQLEnum, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::common::utils::graphql_int;
use crate::common::utils::validation::{optional_text, required_text};
use crate::common::{
    CategoryId, CountryId, DirectoryError, DirectoryResult, LanguageId,
};
use crate::domains::listings::invite::validate_link;
use crate::domains::listings::models::{Listing, ListingFilter, ListingStats, ListingStatus};
use crate::domains::tag::{Tag, TagData};
use crate::domains::taxonomy::models::{Category, Country, Language};
use crate::domains::taxonomy::{CategoryData, CountryData, LanguageData};
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::errors::storage_error;

// =============================================================================
// Output types
// =============================================================================

/// GraphQL type for a listing
#[derive(Debug, Clone)]
pub struct ListingData {
    pub listing: Listing,
}

impl From<Listing> for ListingData {
    fn from(listing: Listing) -> Self {
        Self { listing }
    }
}

#[juniper::graphql_object(context = GraphQLContext)]
impl ListingData {
    fn id(&self) -> String {
        self.listing.id.to_string()
    }

    fn name(&self) -> &str {
        &self.listing.name
    }

    fn slug(&self) -> &str {
        &self.listing.slug
    }

    fn description(&self) -> Option<&str> {
        self.listing.description.as_deref()
    }

    fn invite_link(&self) -> &str {
        &self.listing.invite_link
    }

    fn invite_code(&self) -> &str {
        &self.listing.invite_code
    }

    fn image_url(&self) -> Option<&str> {
        self.listing.image_url.as_deref()
    }

    fn member_count(&self) -> i32 {
        graphql_int(self.listing.member_count)
    }

    fn status(&self) -> ListingStatusData {
        self.listing.status.into()
    }

    fn featured(&self) -> bool {
        self.listing.featured
    }

    /// Moderator notes; hidden from non-admin callers
    fn admin_notes(&self, ctx: &GraphQLContext) -> Option<&str> {
        if ctx.is_admin {
            self.listing.admin_notes.as_deref()
        } else {
            None
        }
    }

    fn meta_title(&self) -> Option<&str> {
        self.listing.meta_title.as_deref()
    }

    fn meta_description(&self) -> Option<&str> {
        self.listing.meta_description.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.listing.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.listing.updated_at
    }

    fn last_verified(&self) -> Option<DateTime<Utc>> {
        self.listing.last_verified
    }

    async fn category(&self, ctx: &GraphQLContext) -> FieldResult<Option<CategoryData>> {
        let category = Category::find_by_id(self.listing.category_id, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(category.map(CategoryData::from))
    }

    async fn country(&self, ctx: &GraphQLContext) -> FieldResult<Option<CountryData>> {
        let country = Country::find_by_id(self.listing.country_id, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(country.map(CountryData::from))
    }

    async fn language(&self, ctx: &GraphQLContext) -> FieldResult<Option<LanguageData>> {
        let language = Language::find_by_id(self.listing.language_id, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(language.map(LanguageData::from))
    }

    /// Tags in the order the submitter entered them
    async fn tags(&self, ctx: &GraphQLContext) -> FieldResult<Vec<TagData>> {
        let tags = Tag::find_for_listing(self.listing.id, &ctx.db_pool)
            .await
            .map_err(storage_error)?;
        Ok(tags.into_iter().map(TagData::from).collect())
    }
}

/// Offset-paginated page of listings
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct ListingConnection {
    pub nodes: Vec<ListingData>,
    pub total_count: i32,
    pub has_next_page: bool,
}

impl ListingConnection {
    pub fn new(listings: Vec<Listing>, total_count: i64, offset: i64) -> Self {
        let has_next_page = offset + (listings.len() as i64) < total_count;
        Self {
            nodes: listings.into_iter().map(ListingData::from).collect(),
            total_count: graphql_int(total_count),
            has_next_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum ListingStatusData {
    Pending,
    Approved,
    Rejected,
}

impl From<ListingStatus> for ListingStatusData {
    fn from(status: ListingStatus) -> Self {
        match status {
            ListingStatus::Pending => Self::Pending,
            ListingStatus::Approved => Self::Approved,
            ListingStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<ListingStatusData> for ListingStatus {
    fn from(status: ListingStatusData) -> Self {
        match status {
            ListingStatusData::Pending => Self::Pending,
            ListingStatusData::Approved => Self::Approved,
            ListingStatusData::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct ListingStatsData {
    pub total: i32,
    pub pending: i32,
    pub approved: i32,
    pub rejected: i32,
    pub featured: i32,
}

impl From<ListingStats> for ListingStatsData {
    fn from(stats: ListingStats) -> Self {
        Self {
            total: graphql_int(stats.total),
            pending: graphql_int(stats.pending),
            approved: graphql_int(stats.approved),
            rejected: graphql_int(stats.rejected),
            featured: graphql_int(stats.featured),
        }
    }
}

/// Admin bulk moderation verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum BulkAction {
    Approve,
    Reject,
    Delete,
    Feature,
    Unfeature,
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkAction::Approve => write!(f, "approve"),
            BulkAction::Reject => write!(f, "reject"),
            BulkAction::Delete => write!(f, "delete"),
            BulkAction::Feature => write!(f, "feature"),
            BulkAction::Unfeature => write!(f, "unfeature"),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct BulkModerationResult {
    pub action: BulkAction,
    /// Number of requested ids that matched a listing
    pub affected_count: i32,
}

// =============================================================================
// Inputs
// =============================================================================

/// Public browse filters; every field is optional.
#[derive(Debug, Clone, Default, GraphQLInputObject)]
pub struct ListingFilterInput {
    pub category_slug: Option<String>,
    pub country_slug: Option<String>,
    pub language_slug: Option<String>,
    pub tag_slug: Option<String>,
    /// Free text matched against name and description
    pub q: Option<String>,
}

impl From<ListingFilterInput> for ListingFilter {
    fn from(input: ListingFilterInput) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            category_slug: clean(input.category_slug),
            country_slug: clean(input.country_slug),
            language_slug: clean(input.language_slug),
            tag_slug: clean(input.tag_slug),
            query: clean(input.q),
        }
    }
}

const INVITE_LINK_HINT: &str =
    "must be a WhatsApp group invite link like https://chat.whatsapp.com/AbC123";

fn invite_link(value: &str) -> DirectoryResult<String> {
    let link = value.trim();
    if link.is_empty() {
        return Err(DirectoryError::validation("invite_link", "is required"));
    }
    if !validate_link(link) {
        return Err(DirectoryError::validation("invite_link", INVITE_LINK_HINT));
    }
    Ok(link.to_string())
}

/// Public submission form
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SubmitListingInput {
    pub name: String,
    pub description: Option<String>,
    pub invite_link: String,
    pub category_id: Uuid,
    pub country_id: Uuid,
    pub language_id: Uuid,
    /// Comma separated, e.g. "crypto, trading, news"
    pub tags: Option<String>,
}

/// A submission that passed field validation. Taxonomy ids still need an
/// existence check against storage.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub name: String,
    pub description: Option<String>,
    pub invite_link: String,
    pub category_id: CategoryId,
    pub country_id: CountryId,
    pub language_id: LanguageId,
    pub tags: String,
}

impl SubmitListingInput {
    pub fn validate(&self) -> DirectoryResult<ValidSubmission> {
        Ok(ValidSubmission {
            name: required_text("name", &self.name, 2, 200)?,
            description: optional_text("description", self.description.as_deref(), 1000)?,
            invite_link: invite_link(&self.invite_link)?,
            category_id: CategoryId::from_uuid(self.category_id),
            country_id: CountryId::from_uuid(self.country_id),
            language_id: LanguageId::from_uuid(self.language_id),
            tags: self.tags.clone().unwrap_or_default(),
        })
    }
}

/// Admin edit form. Every field is written; `tags` replaces the whole set and
/// an absent or blank value clears it.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct EditListingInput {
    pub name: String,
    pub description: Option<String>,
    pub invite_link: String,
    pub category_id: Uuid,
    pub country_id: Uuid,
    pub language_id: Uuid,
    pub status: ListingStatusData,
    pub featured: bool,
    pub admin_notes: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidEdit {
    pub name: String,
    pub description: Option<String>,
    pub invite_link: String,
    pub category_id: CategoryId,
    pub country_id: CountryId,
    pub language_id: LanguageId,
    pub status: ListingStatus,
    pub featured: bool,
    pub admin_notes: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub tags: String,
}

impl EditListingInput {
    pub fn validate(&self) -> DirectoryResult<ValidEdit> {
        Ok(ValidEdit {
            name: required_text("name", &self.name, 2, 200)?,
            description: optional_text("description", self.description.as_deref(), 1000)?,
            invite_link: invite_link(&self.invite_link)?,
            category_id: CategoryId::from_uuid(self.category_id),
            country_id: CountryId::from_uuid(self.country_id),
            language_id: LanguageId::from_uuid(self.language_id),
            status: self.status.into(),
            featured: self.featured,
            admin_notes: optional_text("admin_notes", self.admin_notes.as_deref(), 2000)?,
            meta_title: optional_text("meta_title", self.meta_title.as_deref(), 200)?,
            meta_description: optional_text(
                "meta_description",
                self.meta_description.as_deref(),
                300,
            )?,
            tags: self.tags.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> SubmitListingInput {
        SubmitListingInput {
            name: "Crypto Traders".into(),
            description: Some("Daily signals".into()),
            invite_link: "https://chat.whatsapp.com/AbC123".into(),
            category_id: Uuid::now_v7(),
            country_id: Uuid::now_v7(),
            language_id: Uuid::now_v7(),
            tags: Some("crypto, news".into()),
        }
    }

    fn field_of(err: DirectoryError) -> &'static str {
        match err {
            DirectoryError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_submission_passes() {
        let valid = submission().validate().unwrap();
        assert_eq!(valid.name, "Crypto Traders");
        assert_eq!(valid.tags, "crypto, news");
    }

    #[test]
    fn short_name_is_rejected() {
        let input = SubmitListingInput {
            name: "A".into(),
            ..submission()
        };
        assert_eq!(field_of(input.validate().unwrap_err()), "name");
    }

    #[test]
    fn long_description_is_rejected() {
        let input = SubmitListingInput {
            description: Some("x".repeat(1001)),
            ..submission()
        };
        assert_eq!(field_of(input.validate().unwrap_err()), "description");
    }

    #[test]
    fn non_whatsapp_link_is_rejected() {
        let input = SubmitListingInput {
            invite_link: "https://t.me/joinchat/abc".into(),
            ..submission()
        };
        assert_eq!(field_of(input.validate().unwrap_err()), "invite_link");
    }

    #[test]
    fn blank_link_is_required() {
        let input = SubmitListingInput {
            invite_link: "  ".into(),
            ..submission()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "invite_link: is required");
    }

    #[test]
    fn edit_limits_meta_lengths() {
        let input = EditListingInput {
            name: "Crypto Traders".into(),
            description: None,
            invite_link: "https://chat.whatsapp.com/AbC123".into(),
            category_id: Uuid::now_v7(),
            country_id: Uuid::now_v7(),
            language_id: Uuid::now_v7(),
            status: ListingStatusData::Approved,
            featured: false,
            admin_notes: None,
            meta_title: Some("t".repeat(201)),
            meta_description: None,
            tags: None,
        };
        assert_eq!(field_of(input.validate().unwrap_err()), "meta_title");
    }

    #[test]
    fn blank_filters_are_dropped() {
        let filter = ListingFilter::from(ListingFilterInput {
            category_slug: Some("music".into()),
            q: Some("   ".into()),
            ..Default::default()
        });
        assert_eq!(filter.category_slug.as_deref(), Some("music"));
        assert_eq!(filter.query, None);
    }

    #[test]
    fn connection_reports_next_page() {
        let page = ListingConnection::new(Vec::new(), 10, 10);
        assert!(!page.has_next_page);
        assert_eq!(page.total_count, 10);
    }
}
