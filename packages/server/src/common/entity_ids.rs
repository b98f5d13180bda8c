//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use directory_core::common::{ListingId, TagId};
//!
//! let listing_id: ListingId = ListingId::new();
//! let tag_id: TagId = TagId::new();
//!
//! // This would be a compile error:
//! // let wrong: TagId = listing_id;
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for submitted group listings.
pub struct Listing;

/// Marker type for free-text tags.
pub struct Tag;

/// Marker type for listing categories.
pub struct Category;

/// Marker type for countries.
pub struct Country;

/// Marker type for languages.
pub struct Language;

/// Marker type for static pages.
pub struct Page;

/// Marker type for blog posts.
pub struct BlogPost;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type ListingId = Id<Listing>;

pub type TagId = Id<Tag>;

pub type CategoryId = Id<Category>;

pub type CountryId = Id<Country>;

pub type LanguageId = Id<Language>;

pub type PageId = Id<Page>;

pub type BlogPostId = Id<BlogPost>;
