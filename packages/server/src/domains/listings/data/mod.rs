pub mod types;

pub use types::{
    BulkAction, BulkModerationResult, EditListingInput, ListingConnection, ListingData,
    ListingFilterInput, ListingStatsData, ListingStatusData, SubmitListingInput, ValidEdit,
    ValidSubmission,
};
