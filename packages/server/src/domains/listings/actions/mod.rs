pub mod moderation;
pub mod submit;

pub use moderation::{
    approve, bulk_moderate, delete, edit_listing, feature, reject, unfeature, verify_listing,
};
pub use submit::submit_listing;
