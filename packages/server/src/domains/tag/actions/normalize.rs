//! Comma-separated tag input to Tag rows.

use sqlx::SqliteConnection;
use std::collections::HashSet;
use tracing::debug;

use crate::domains::tag::models::tag::{name_key, Tag};

/// Split on commas, trim, drop blanks and collapse case-insensitive
/// duplicates. The first spelling of each tag wins.
pub fn parse_tag_names(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name_key(name)))
        .map(str::to_string)
        .collect()
}

/// Resolve every tag named in `input`, creating the missing ones.
///
/// Runs on the caller's connection so new tags commit or roll back together
/// with the listing that introduced them. Output keeps input order.
pub async fn resolve_tags(input: &str, conn: &mut SqliteConnection) -> sqlx::Result<Vec<Tag>> {
    let names = parse_tag_names(input);
    let mut tags = Vec::with_capacity(names.len());

    for name in names {
        let (tag, created) = Tag::find_or_create(&name, conn).await?;
        if created {
            debug!(tag = %tag.name, slug = %tag.slug, "Created tag");
        }
        tags.push(tag);
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_case_insensitive_duplicates() {
        assert_eq!(parse_tag_names("Funny, funny , New"), vec!["Funny", "New"]);
    }

    #[test]
    fn drops_blank_entries() {
        assert_eq!(parse_tag_names(" , ,a,, b ,"), vec!["a", "b"]);
        assert!(parse_tag_names("").is_empty());
        assert!(parse_tag_names(" , ").is_empty());
    }

    #[test]
    fn keeps_first_occurrence_order() {
        assert_eq!(
            parse_tag_names("zeta, Alpha, ZETA, beta, alpha"),
            vec!["zeta", "Alpha", "beta"]
        );
    }
}
