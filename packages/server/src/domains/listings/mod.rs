pub mod actions;
pub mod data;
pub mod effects;
pub mod invite;
pub mod models;

// Re-export commonly used types
pub use data::{ListingConnection, ListingData};
pub use models::{Listing, ListingStatus};
