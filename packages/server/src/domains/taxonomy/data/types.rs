use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};

use crate::common::utils::{graphql_int, slugify};
use crate::common::utils::validation::{optional_text, required_text};
use crate::common::{DirectoryError, DirectoryResult};
use crate::domains::taxonomy::models::{Category, CategoryWithCount, Country, Language};

#[derive(Debug, Clone, GraphQLObject)]
pub struct CategoryData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Approved listings, only filled in by `popularCategories`
    pub listing_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryData {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            listing_count: None,
            created_at: category.created_at,
        }
    }
}

impl From<CategoryWithCount> for CategoryData {
    fn from(row: CategoryWithCount) -> Self {
        Self {
            listing_count: Some(graphql_int(row.listing_count)),
            ..Self::from(row.category)
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct CountryData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub code: Option<String>,
}

impl From<Country> for CountryData {
    fn from(country: Country) -> Self {
        Self {
            id: country.id.to_string(),
            name: country.name,
            slug: country.slug,
            code: country.code,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct LanguageData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub code: Option<String>,
}

impl From<Language> for LanguageData {
    fn from(language: Language) -> Self {
        Self {
            id: language.id.to_string(),
            name: language.name,
            slug: language.slug,
            code: language.code,
        }
    }
}

/// Counts of rows written by `seedTaxonomy`. Existing names are skipped.
#[derive(Debug, Clone, Default, GraphQLObject)]
pub struct SeedSummary {
    pub categories_created: i32,
    pub countries_created: i32,
    pub languages_created: i32,
}

// =============================================================================
// Inputs
// =============================================================================

/// Name and slug after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyName {
    pub name: String,
    pub slug: String,
}

fn taxonomy_name(value: &str) -> DirectoryResult<TaxonomyName> {
    let name = required_text("name", value, 2, 100)?;
    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(DirectoryError::validation(
            "name",
            "must contain at least one letter or digit",
        ));
    }
    Ok(TaxonomyName { name, slug })
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn validate(&self) -> DirectoryResult<(TaxonomyName, Option<String>)> {
        let name = taxonomy_name(&self.name)?;
        let description = optional_text("description", self.description.as_deref(), 1000)?;
        Ok((name, description))
    }
}

/// Shared by countries and languages.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CodedTaxonomyInput {
    pub name: String,
    /// ISO code, e.g. "DE" or "de"
    pub code: Option<String>,
}

impl CodedTaxonomyInput {
    pub fn validate(&self) -> DirectoryResult<(TaxonomyName, Option<String>)> {
        let name = taxonomy_name(&self.name)?;
        let code = optional_text("code", self.code.as_deref(), 10)?;
        Ok((name, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_the_name() {
        let input = CategoryInput {
            name: " Music/Audio/Songs ".into(),
            description: None,
        };
        let (name, description) = input.validate().unwrap();
        assert_eq!(name.name, "Music/Audio/Songs");
        assert_eq!(name.slug, "music-audio-songs");
        assert_eq!(description, None);
    }

    #[test]
    fn rejects_names_without_slug_characters() {
        let input = CodedTaxonomyInput {
            name: "!!!".into(),
            code: None,
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DirectoryError::Validation { field: "name", .. }));
    }

    #[test]
    fn rejects_single_character_names() {
        let input = CodedTaxonomyInput {
            name: "X".into(),
            code: Some("XX".into()),
        };
        assert!(input.validate().is_err());
    }
}
