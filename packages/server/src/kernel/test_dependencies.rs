// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BasePageFetcher, EnrichmentConfig, FetchedPage, ServerDeps};

// =============================================================================
// Mock Page Fetcher
// =============================================================================

/// What the next `fetch` call should produce.
#[derive(Debug, Clone)]
enum MockResponse {
    Page { status: u16, body: String },
    Error(String),
    Hang,
}

/// Replays queued responses in order. When the queue is empty every call fails,
/// which is also how tests simulate a timeout.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with the given HTML.
    pub fn with_html(self, html: &str) -> Self {
        self.with_status(200, html)
    }

    pub fn with_status(self, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(MockResponse::Page {
            status,
            body: body.to_string(),
        });
        self
    }

    /// Queue a transport failure (connection refused, timeout, ...).
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(message.to_string()));
        self
    }

    /// Queue a request that never answers, so the caller's timeout fires.
    pub fn with_hang(self) -> Self {
        self.responses.lock().unwrap().push_back(MockResponse::Hang);
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage> {
        self.calls.lock().unwrap().push(url.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Page { status, body }) => Ok(FetchedPage {
                url: url.to_string(),
                status,
                body,
            }),
            Some(MockResponse::Error(message)) => anyhow::bail!(message),
            Some(MockResponse::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                anyhow::bail!("request to {} hung", url)
            }
            None => anyhow::bail!("request to {} timed out after {:?}", url, timeout),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for `ServerDeps` wired to mocks.
pub struct TestDependencies {
    pub page_fetcher: MockPageFetcher,
    pub enrichment: EnrichmentConfig,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            page_fetcher: MockPageFetcher::new(),
            enrichment: EnrichmentConfig {
                enabled: true,
                timeout: Duration::from_millis(50),
            },
        }
    }

    pub fn mock_fetcher(mut self, fetcher: MockPageFetcher) -> Self {
        self.page_fetcher = fetcher;
        self
    }

    pub fn enrichment_disabled(mut self) -> Self {
        self.enrichment.enabled = false;
        self
    }

    pub fn into_server_deps(self, db_pool: SqlitePool) -> ServerDeps {
        ServerDeps::new(db_pool, Arc::new(self.page_fetcher), self.enrichment)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
