pub mod site_settings;

pub use site_settings::{SiteSettings, SiteSettingsDraft};
