//! Best-effort metadata scrape of a group's public invite page.
//!
//! Enrichment never fails an operation: callers log the `EnrichmentFailure`
//! and carry on with whatever the submitter provided.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::kernel::{BasePageFetcher, EnrichmentConfig};

lazy_static! {
    static ref MEMBER_COUNT_REGEX: Regex = Regex::new(r"(?i)(\d+)\s*members?").unwrap();
}

/// What could be read off the invite page. Every field is optional;
/// `member_count` is 0 when the page does not mention it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub member_count: i64,
}

#[derive(Debug, Error)]
pub enum EnrichmentFailure {
    #[error("enrichment is disabled")]
    Disabled,

    #[error("fetch timed out")]
    Timeout,

    #[error("fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),

    #[error("invite page returned HTTP {0}")]
    Status(u16),

    #[error("invite page was empty")]
    EmptyBody,
}

/// Fetch the invite page once and read metadata from it.
pub async fn enrich(
    link: &str,
    fetcher: &dyn BasePageFetcher,
    config: &EnrichmentConfig,
) -> Result<GroupMetadata, EnrichmentFailure> {
    if !config.enabled {
        return Err(EnrichmentFailure::Disabled);
    }

    let page = tokio::time::timeout(config.timeout, fetcher.fetch(link, config.timeout))
        .await
        .map_err(|_| EnrichmentFailure::Timeout)?
        .map_err(EnrichmentFailure::Fetch)?;

    if !page.is_success() {
        return Err(EnrichmentFailure::Status(page.status));
    }
    if page.body.trim().is_empty() {
        return Err(EnrichmentFailure::EmptyBody);
    }

    let metadata = parse_metadata(&page.body);
    debug!(
        link = %link,
        has_image = metadata.image_url.is_some(),
        member_count = metadata.member_count,
        "Read invite page metadata"
    );
    Ok(metadata)
}

/// Pull the preview fields out of an invite page.
pub fn parse_metadata(html: &str) -> GroupMetadata {
    let document = Html::parse_document(html);

    GroupMetadata {
        name: extract_title(&document),
        description: meta_content(&document, r#"meta[property="og:description"]"#)
            .or_else(|| meta_content(&document, r#"meta[name="description"]"#)),
        image_url: extract_image(&document),
        member_count: extract_member_count(&document),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// og:image, then twitter:image, then the first WhatsApp-hosted `<img>`.
fn extract_image(document: &Html) -> Option<String> {
    meta_content(document, r#"meta[property="og:image"]"#)
        .or_else(|| meta_content(document, r#"meta[name="twitter:image"]"#))
        .or_else(|| {
            let selector = Selector::parse("img[src]").ok()?;
            document
                .select(&selector)
                .filter_map(|el| el.value().attr("src"))
                .find(|src| {
                    src.to_lowercase().contains("whatsapp") || src.contains("pps.whatsapp.net")
                })
                .map(str::to_string)
        })
}

fn extract_member_count(document: &Html) -> i64 {
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    MEMBER_COUNT_REGEX
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))
        .map(|count| count.min(i64::from(i32::MAX)))
        .unwrap_or(0)
}
