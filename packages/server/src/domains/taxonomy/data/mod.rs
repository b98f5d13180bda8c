pub mod types;

pub use types::{
    CategoryData, CategoryInput, CodedTaxonomyInput, CountryData, LanguageData, SeedSummary,
    TaxonomyName,
};
