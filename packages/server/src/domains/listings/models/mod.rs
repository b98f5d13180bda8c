pub mod listing;

pub use listing::{CreateListing, Listing, ListingFilter, ListingStats, ListingStatus, UpdateListing};
