pub mod types;

pub use types::{SiteSettingsData, SiteSettingsInput};
