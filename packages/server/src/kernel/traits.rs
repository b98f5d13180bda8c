// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "enrich a listing") lives in domain functions that use
// these traits.
//
// Naming convention: Base* for trait names (e.g., BasePageFetcher)

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

// =============================================================================
// Page Fetcher Trait (Infrastructure - one HTTP GET)
// =============================================================================

/// Raw result of fetching a page. Non-2xx responses are still returned here;
/// deciding what a status means is up to the caller.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// Issue a single GET, giving up after `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage>;
}
