//! Test harness over a private in-memory SQLite database.
//!
//! Every harness gets its own database with migrations applied and a minimal
//! taxonomy already inserted, so tests never see each other's rows.

use anyhow::{Context, Result};
use directory_core::kernel::{
    connect_in_memory, run_migrations, MockPageFetcher, ServerDeps, TestDependencies,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use test_context::AsyncTestContext;

use super::{create_taxonomy, GraphQLClient, TestTaxonomy};

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let client = ctx.graphql();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: SqlitePool,
    /// Replays invite page responses; queue them before submitting.
    pub fetcher: MockPageFetcher,
    pub deps: Arc<ServerDeps>,
    pub taxonomy: TestTaxonomy,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_dependencies(TestDependencies::new()).await
    }

    /// Harness whose invite page fetches replay `fetcher`'s queued responses.
    pub async fn with_fetcher(fetcher: MockPageFetcher) -> Result<Self> {
        Self::with_dependencies(TestDependencies::new().mock_fetcher(fetcher)).await
    }

    /// Harness whose enrichment is switched off.
    pub async fn without_enrichment() -> Result<Self> {
        Self::with_dependencies(TestDependencies::new().enrichment_disabled()).await
    }

    async fn with_dependencies(test_deps: TestDependencies) -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let db_pool = connect_in_memory().await?;
        run_migrations(&db_pool).await?;

        let taxonomy = create_taxonomy(&db_pool)
            .await
            .context("Failed to create test taxonomy")?;

        let fetcher = test_deps.page_fetcher.clone();
        let deps = Arc::new(test_deps.into_server_deps(db_pool.clone()));

        Ok(Self {
            db_pool,
            fetcher,
            deps,
            taxonomy,
        })
    }

    /// GraphQL client for a public (non-admin) caller.
    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.deps.clone(), false)
    }

    /// GraphQL client carrying admin rights.
    pub fn admin_graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.deps.clone(), true)
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.db_pool)
            .await
            .expect("count query failed")
    }
}
