pub mod actions;
pub mod data;
pub mod models;

pub use data::SiteSettingsData;
pub use models::SiteSettings;
