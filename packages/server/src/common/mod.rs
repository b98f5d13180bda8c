// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod utils;

pub use entity_ids::*;
pub use errors::{is_unique_violation, DirectoryError, DirectoryResult};
pub use id::Id;
