pub mod actions;
pub mod data;
pub mod models;

pub use data::{CategoryData, CountryData, LanguageData};
pub use models::{Category, Country, Language};
