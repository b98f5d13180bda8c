// Business domains
pub mod content;
pub mod listings;
pub mod settings;
pub mod tag;
pub mod taxonomy;
